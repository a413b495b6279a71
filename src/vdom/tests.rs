use super::*;

#[test]
fn test_construct() {
    let target = construct(
        "div",
        Attributes::from_pairs([("id", "app")]).unwrap(),
        vec![
            construct("p", Attributes::new(), vec!["Some paragraph".into()])
                .unwrap()
                .into(),
            "Some untagged text".into(),
            42i32.into(),
        ],
    )
    .unwrap();

    assert_eq!(target.tag(), "div");
    assert_eq!(target.attributes().get("id"), Some(&AttrValue::from("app")));
    assert_eq!(target.children().len(), 3);
    assert_eq!(target.children()[0].as_element().unwrap().tag(), "p");
    assert_eq!(target.children()[1], NodeValue::Text("Some untagged text".into()));
    assert_eq!(target.children()[2], NodeValue::Number(Number::Int(42)));
}

#[test]
fn test_children_order_preserved() {
    let node = h!("ul", attributes! {}, "c", "a", "b", "a", 1i32, 1i32).unwrap();
    let children: Vec<_> = node.children().iter().filter_map(|c| c.leaf_text()).collect();
    assert_eq!(children, ["c", "a", "b", "a", "1", "1"]);
}

#[test]
fn test_no_children() {
    let node = h!("br", attributes! {}).unwrap();
    assert!(node.children().is_empty());
    assert!(node.attributes().is_empty());
}

#[test]
fn test_nested_children_not_flattened() {
    let inner = h!("span", attributes! {}, "x").unwrap();
    let node = h!("p", attributes! {}, inner.clone(), "y").unwrap();
    assert_eq!(node.children().len(), 2);
    assert_eq!(node.children()[0], NodeValue::Element(inner));
}

#[test]
fn test_empty_tag_rejected() {
    assert_eq!(construct("", Attributes::new(), vec![]), Err(Error::EmptyTag));
    assert_eq!(h!("", attributes! {}, "text"), Err(Error::EmptyTag));
}

#[test]
fn test_tag_legality_deferred() {
    // Only the host knows whether this is a valid element
    assert!(construct("not a tag!", Attributes::new(), vec![]).is_ok());
}

#[test]
fn test_duplicate_attribute() {
    assert_eq!(
        attributes! { "id" => "a", "id" => "b" },
        Err(Error::DuplicateAttribute("id".into()))
    );
    let mut attrs = Attributes::new();
    attrs.insert("class", "x").unwrap();
    assert!(attrs.insert("class", "y").is_err());
    assert_eq!(attrs.len(), 1);
}

#[test]
fn test_event_attribute_needs_handler() {
    assert_eq!(
        h!("button", attributes! { "onclick" => "alert(1)" }),
        Err(Error::NonCallableEventAttribute {
            name: "onclick".into()
        })
    );
    let handler = Handler::new(|_| {});
    assert_eq!(
        h!("button", attributes! { "title" => handler }),
        Err(Error::HandlerOnStaticAttribute {
            name: "title".into()
        })
    );
}

#[test]
fn test_nested_error_surfaces() {
    let res = h!(
        "div",
        attributes! { "id" => "app" },
        h!("p", attributes! {}, "fine"),
        h!("", attributes! {}),
    );
    assert_eq!(res, Err(Error::EmptyTag));
}

#[test]
fn test_attributes_keep_insertion_order() {
    let attrs = attributes! { "type" => "button", "id" => "increment", "class" => "big" }.unwrap();
    let names: Vec<_> = attrs.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["type", "id", "class"]);
}

#[test]
fn test_attributes_compare_as_map() {
    let a = attributes! { "type" => "button", "id" => "increment" }.unwrap();
    let b = attributes! { "id" => "increment", "type" => "button" }.unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_handler_identity() {
    let a = Handler::new(|_| {});
    let b = Handler::new(|_| {});
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn test_number_display() {
    assert_eq!(Number::from(0.0f64).to_string(), "0");
    assert_eq!(Number::from(-0.0f64).to_string(), "0");
    assert_eq!(Number::from(42.0f64).to_string(), "42");
    assert_eq!(Number::from(-3i32).to_string(), "-3");
    assert_eq!(Number::from(1.5f64).to_string(), "1.5");
    assert_eq!(Number::from(f64::NAN).to_string(), "NaN");
    assert_eq!(Number::from(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Number::from(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(Number::from(0.000001f64).to_string(), "0.000001");
    assert_eq!(Number::from(1e20f64).to_string(), "100000000000000000000");
}

#[test]
fn test_number_exact_integers() {
    assert_eq!(Number::from(9007199254740993i64).to_string(), "9007199254740993");
    assert_eq!(Number::from(i64::MIN).to_string(), "-9223372036854775808");
    assert_eq!(Number::from(u64::MAX).to_string(), "18446744073709551615");
    assert_eq!(Number::from(usize::MAX).to_string(), usize::MAX.to_string());
    assert_ne!(Number::from(9007199254740993i64), Number::from(9007199254740992i64));
}

#[test]
fn test_number_float_forms() {
    assert_eq!(Number::from(0.1f32).to_string(), "0.1");
    assert_eq!(Number::from(1e-7f64).to_string(), "1e-7");
    assert_eq!(Number::from(-2.5e-8f64).to_string(), "-2.5e-8");
    assert_eq!(Number::from(1e21f64).to_string(), "1e+21");
    assert_eq!(Number::from(1.5e300f64).to_string(), "1.5e+300");
}

#[test]
fn test_number_equality() {
    assert_eq!(Number::from(3i32), Number::from(3u64));
    assert_eq!(Number::from(3i64), Number::from(3.0f64));
    assert_ne!(Number::from(-1i64), Number::from(u64::MAX));
    assert_ne!(Number::from(f64::NAN), Number::from(f64::NAN));
}

#[test]
fn test_leaf_text() {
    assert_eq!(NodeValue::from("+1").leaf_text().as_deref(), Some("+1"));
    assert_eq!(NodeValue::from(7u32).leaf_text().as_deref(), Some("7"));
    let el = h!("p", attributes! {}).unwrap();
    assert_eq!(NodeValue::from(el).leaf_text(), None);
}
