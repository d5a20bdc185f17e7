use crate::engine::core::Sti;

#[test]
fn ordered_by_start_then_finish_then_symbol() {
    let a = Sti::new(0, 5, 2);
    let b = Sti::new(0, 6, 1);
    let c = Sti::new(1, 2, 1);
    assert!(a < b);
    assert!(b < c);

    let d = Sti::new(0, 5, 1);
    assert!(d < a);
}

#[test]
fn equality_ignores_the_entity_index() {
    let a = Sti::new(3, 9, 4);
    let b = Sti::new(3, 9, 4);
    a.entity_sti_index.set(0);
    b.entity_sti_index.set(7);
    assert_eq!(a, b);
}

#[test]
fn displays_as_bracketed_range() {
    assert_eq!(Sti::new(2, 7, 1).to_string(), "[2-7]");
}
