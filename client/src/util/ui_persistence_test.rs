use super::*;

#[test]
fn page_size_key_is_namespaced_per_resource() {
    assert_eq!(page_size_key("branches"), "hcims_page_size_branches");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn load_is_none_without_browser() {
    save_page_size("branches", 20);
    assert_eq!(load_page_size("branches"), None);
}
