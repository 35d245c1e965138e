use url::Url;

use crate::tenant::resolve_tenant_key;

fn resolve(raw: &str) -> Option<String> {
    resolve_tenant_key(&Url::parse(raw).unwrap())
}

#[test]
fn test_query_parameter_wins_over_any_hostname() {
    assert_eq!(resolve("http://localhost:3000/?tenant=acme"), Some("acme".to_string()));
    assert_eq!(resolve("https://www.example.com/checkin?tenant=zen"), Some("zen".to_string()));
    assert_eq!(resolve("https://other.example.com/?tenant=acme"), Some("acme".to_string()));
}

#[test]
fn test_subdomain_resolves_to_first_label() {
    assert_eq!(resolve("https://acme.example.com/"), Some("acme".to_string()));
    assert_eq!(resolve("https://zen.hotel-saas.io/dashboard"), Some("zen".to_string()));
}

#[test]
fn test_www_is_not_a_tenant() {
    assert_eq!(resolve("https://www.example.com/"), None);
}

#[test]
fn test_bare_hostname_has_no_subdomain() {
    // splitting "localhost" on "." yields the hostname itself
    assert_eq!(resolve("http://localhost/"), None);
    assert_eq!(resolve("http://localhost:3000/"), None);
}

#[test]
fn test_no_query_and_no_hostname() {
    assert_eq!(resolve("file:///tmp/index.html"), None);
}

#[test]
fn test_multi_label_base_domains_are_not_special_cased() {
    // deployed routing only hands out single-label base domains, so the first
    // label is taken as-is even under a public suffix
    assert_eq!(resolve("https://sawadeeai.hotel.co.uk/"), Some("sawadeeai".to_string()));
    assert_eq!(resolve("https://hotel.co.uk/"), Some("hotel".to_string()));
}

#[test]
fn test_empty_tenant_parameter_counts_as_absent() {
    assert_eq!(resolve("http://localhost/?tenant="), None);
    // the hostname still gets its turn
    assert_eq!(resolve("https://acme.example.com/?tenant="), Some("acme".to_string()));
}

#[test]
fn test_other_query_parameters_are_ignored() {
    assert_eq!(resolve("http://localhost/?lang=th&session=9"), None);
    assert_eq!(resolve("http://localhost/?lang=th&tenant=acme"), Some("acme".to_string()));
}
