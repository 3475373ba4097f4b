use domain::adapters::memory_repo::InMemoryItemRepo;
use domain::service::LookupService;
use domain::{CoreError, Item, Tier};

fn seeded() -> LookupService<InMemoryItemRepo, InMemoryItemRepo> {
    LookupService::new(InMemoryItemRepo::primary(), InMemoryItemRepo::secondary())
}

#[test]
fn get_primary_item_leaves_secondary_untouched() {
    let svc = seeded();

    let (tier, item) = svc.locate(1).unwrap();

    assert_eq!(tier, Tier::Primary);
    assert_eq!(item, Item::new(1, "Item 1"));
    assert_eq!(svc.secondary().len().unwrap(), 2);
}

#[test]
fn get_secondary_item_after_primary_miss() {
    let svc = seeded();

    let (tier, item) = svc.locate(3).unwrap();

    assert_eq!(tier, Tier::Secondary);
    assert_eq!(item, Item::new(3, "Item 3"));
}

#[test]
fn get_unknown_id_is_not_found() {
    let svc = seeded();

    let err = svc.get_item_by_id(5).unwrap_err();

    assert!(matches!(err, CoreError::NotFound));
    assert_eq!(err.to_string(), "Item not found in both repositories");
}

#[test]
fn delete_primary_item_removes_it_from_primary_only() {
    let svc = seeded();

    let deleted = svc.delete_item(1).unwrap();

    assert_eq!(deleted, Item::new(1, "Item 1"));
    assert_eq!(svc.primary().items().unwrap(), vec![Item::new(2, "Item 2")]);
    assert_eq!(svc.secondary().len().unwrap(), 2);
    assert!(matches!(svc.get_item_by_id(1), Err(CoreError::NotFound)));
}

#[test]
fn delete_secondary_item_after_primary_miss() {
    let svc = seeded();

    let (tier, deleted) = svc.remove(3).unwrap();

    assert_eq!(tier, Tier::Secondary);
    assert_eq!(deleted, Item::new(3, "Item 3"));
    assert_eq!(svc.primary().len().unwrap(), 2);
    assert_eq!(svc.secondary().items().unwrap(), vec![Item::new(4, "Item 4")]);
}

#[test]
fn delete_unknown_id_is_not_found() {
    let svc = seeded();

    let err = svc.delete_item(5).unwrap_err();

    assert_eq!(err.to_string(), "Item not found in both repositories");
    assert_eq!(svc.primary().len().unwrap(), 2);
    assert_eq!(svc.secondary().len().unwrap(), 2);
}

#[test]
fn second_delete_of_same_id_fails() {
    let svc = seeded();

    svc.delete_item(4).unwrap();

    assert!(matches!(svc.delete_item(4), Err(CoreError::NotFound)));
}

#[test]
fn deleting_primary_copy_exposes_secondary_copy() {
    let svc = LookupService::new(
        InMemoryItemRepo::with_items(vec![Item::new(7, "primary seven")]),
        InMemoryItemRepo::with_items(vec![Item::new(7, "secondary seven")]),
    );

    assert_eq!(svc.get_item_by_id(7).unwrap().name, "primary seven");
    assert_eq!(svc.delete_item(7).unwrap().name, "primary seven");
    assert_eq!(svc.get_item_by_id(7).unwrap().name, "secondary seven");
}
