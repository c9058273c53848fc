use tripleq::{Aggregating, Constraint, Error, Sequencing, Type, Value};

mod common;

use common::strs;

fn case_insensitive_constraint() -> Constraint {
    common::case_insensitive()
        .derive(&Type::string(), &Type::string())
        .unwrap()
}

#[test]
fn sequencing_a_string() {
    common::setup();
    let seq = Sequencing::new(Constraint::default());
    let letters = |s: &str| s.chars().map(Value::Char).collect::<Vec<_>>();

    assert_eq!(seq.contains_in_order(&"aabc".into(), &letters("abc")), Ok(true));
    assert_eq!(seq.contains_in_order(&"aa".into(), &letters("aaa")), Ok(false));
    assert_eq!(seq.contains_in_order_only(&"abcd".into(), &letters("abcd")), Ok(true));
    assert_eq!(seq.contains_in_order_only(&"z".into(), &letters("abcd")), Ok(false));
}

#[test]
fn sequencing_with_a_scoped_equality() {
    common::setup();
    let seq = Sequencing::new(case_insensitive_constraint());
    let list = Value::list(strs(["One", "TWO", "two", "three"]));

    assert_eq!(seq.contains_in_order(&list, &strs(["one", "THREE"])), Ok(true));
    assert_eq!(seq.contains_in_order(&list, &strs(["three", "one"])), Ok(false));
    assert_eq!(
        seq.contains_in_order_only(&list, &strs(["one", "two", "three"])),
        Ok(true)
    );
    assert_eq!(
        seq.contains_the_same_elements_in_order_as(
            &list,
            &Value::array(strs(["one", "two", "TWO", "Three"]))
        ),
        Ok(true)
    );
    assert!(matches!(
        seq.contains_in_order(&Value::set(strs(["a"])), &strs(["a"])),
        Err(Error::NotASequence(_))
    ));
}

#[test]
fn aggregating_with_a_scoped_equality() {
    common::setup();
    let agg = Aggregating::new(case_insensitive_constraint());
    let set = Value::set(strs(["Red", "Green", "Blue"]));

    assert_eq!(agg.contains(&set, &"RED".into()), Ok(true));
    assert_eq!(agg.contains_all_of(&set, &strs(["red", "blue"])), Ok(true));
    assert_eq!(agg.contains_at_least_one_of(&set, &strs(["pink", "green"])), Ok(true));
    assert_eq!(agg.contains_one_of(&set, &strs(["red", "blue"])), Ok(false));
    assert_eq!(agg.contains_one_of(&set, &strs(["red", "pink"])), Ok(true));
    assert_eq!(agg.contains_at_most_one_of(&set, &strs(["pink", "cyan"])), Ok(true));
    assert_eq!(agg.contains_none_of(&set, &strs(["pink", "cyan"])), Ok(true));
    assert_eq!(agg.contains_only(&set, &strs(["blue", "green", "red"])), Ok(true));
    assert_eq!(agg.contains_only(&set, &strs(["blue", "green"])), Ok(false));
    assert_eq!(
        agg.contains_the_same_elements_as(&set, &Value::vector(strs(["blue", "red", "GREEN"]))),
        Ok(true)
    );
    assert_eq!(
        agg.contains_the_same_elements_as(&set, &Value::vector(strs(["blue", "red", "red"]))),
        Ok(false)
    );
}

#[test]
fn options_hold_zero_or_one_element() {
    common::setup();
    let agg = Aggregating::new(Constraint::default());
    assert_eq!(agg.contains(&Value::some(1.into()), &1.into()), Ok(true));
    assert_eq!(agg.contains(&Value::none(), &1.into()), Ok(false));
    assert_eq!(agg.contains_none_of(&Value::none(), &[1.into()]), Ok(true));
}
