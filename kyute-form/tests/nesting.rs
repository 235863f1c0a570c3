use kyute_form::{
    find, FieldError, FieldId, FieldStatus, Form, FormBuilder, FormMsg, FormState, Layout, WidgetExt,
    widgets::{DisplayFormatter, FormattedInput, Select, TextInput},
};

#[derive(Clone, Debug, PartialEq)]
struct Address {
    street: String,
    zip: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
struct Order {
    name: String,
    address: Address,
}

fn address_form() -> Form<Address, String> {
    FormBuilder::new()
        .field(TextInput::new().non_blank())
        .field(FormattedInput::new(DisplayFormatter, |text| format!("invalid zip code: {text}")))
        .build(|(street, zip)| {
            let (street2, zip2) = (street.clone(), zip.clone());
            Layout::new(
                move |state| Address {
                    street: street.value(state),
                    zip: zip.value(state),
                },
                move |state| [street2.view(state), zip2.view(state)].concat(),
            )
        })
}

fn order_form() -> Form<Order, String> {
    FormBuilder::new()
        .dom_id("order")
        .field(TextInput::new())
        .field(address_form())
        .build(|(name, address)| {
            let (name2, address2) = (name.clone(), address.clone());
            Layout::new(
                move |state| Order {
                    name: name.value(state),
                    address: address.value(state),
                },
                move |state| [name2.view(state), address2.view(state)].concat(),
            )
        })
}

fn fire<D, E>(form: &Form<D, E>, state: FormState, dom_id: &str, event: &str, payload: &str) -> FormState {
    let view = form.render(&state, |msg| msg);
    let msg = find(&view, dom_id)
        .and_then(|element| element.trigger(event, payload))
        .unwrap_or_else(|| panic!("no {event} listener on {dom_id}"));
    form.update(msg, state)
}

#[test]
fn nested_form_fields() {
    let form = order_form();
    let state = form.init();
    let state = fire(&form, state, "order-f0", "input", "Ada");
    let state = fire(&form, state, "order-f1-f0", "input", "1 Analytical Way");
    let state = fire(&form, state, "order-f1-f1", "input", "12345");
    assert_eq!(
        form.result(&state),
        Ok(Order {
            name: "Ada".into(),
            address: Address {
                street: "1 Analytical Way".into(),
                zip: Some(12345),
            },
        })
    );
    assert_eq!(state.status(FieldId::from_u32(1)), FieldStatus::Changed);
}

#[test]
fn nested_errors_shown_once() {
    let form = order_form();
    let state = fire(&form, form.init(), "order-f1-f1", "input", "abc");
    assert_eq!(
        form.errors(&state),
        vec![
            FieldError::MustNotBeBlank,
            FieldError::Custom("invalid zip code: abc".to_string())
        ]
    );

    let state = fire(&form, state, "order-f1-f1", "blur", "");
    assert_eq!(state.status(FieldId::from_u32(1)), FieldStatus::Blurred);
    let view = form.render(&state, |msg| msg);
    // the zip field shows its error, the untouched street doesn't, and the nested form isn't decorated again
    assert!(find(&view, "order-f1-f1-errors").is_some());
    assert!(find(&view, "order-f1-f0-errors").is_none());
    assert!(find(&view, "order-f1-errors").is_none());

    let state = form.blur_all(state);
    let view = form.render(&state, |msg| msg);
    assert!(find(&view, "order-f1-f0-errors").is_some());
}

#[test]
fn messages_from_another_form_are_dropped() {
    let form = order_form();
    let state = form.init();
    let msg = FormMsg::add(FieldId::from_u32(5), 0);
    assert_eq!(form.update(msg, state.clone()), state);
}

#[test]
fn variant_field() {
    #[derive(Debug, PartialEq)]
    enum Contact {
        Email(String),
        Post(Address),
    }

    let email: Form<Contact, String> = FormBuilder::new()
        .field(TextInput::new().non_blank())
        .build(|(address,)| {
            let view = address.clone();
            Layout::new(move |state| Contact::Email(address.value(state)), move |state| view.view(state))
        });
    let post: Form<Contact, String> = FormBuilder::new()
        .field(address_form())
        .build(|(address,)| {
            let view = address.clone();
            Layout::new(move |state| Contact::Post(address.value(state)), move |state| view.view(state))
        });

    let form: Form<Contact, String> = FormBuilder::new()
        .dom_id("contact")
        .field_with_variants(
            Select::new([("email", "E-mail"), ("post", "Post")]),
            ("email", email),
            [("post".to_string(), post)],
        )
        .build(|(contact,)| {
            let view = contact.clone();
            Layout::new(move |state| contact.value(state), move |state| view.view(state))
        });

    let state = fire(&form, form.init(), "contact-f0-v0-f0", "input", "ada@example.org");
    assert_eq!(form.extract(&state), Contact::Email("ada@example.org".into()));

    let state = fire(&form, state, "contact-f0", "change", "post");
    let state = fire(&form, state, "contact-f0-v1-f0-f0", "input", "Baker Street");
    assert_eq!(
        form.extract(&state),
        Contact::Post(Address {
            street: "Baker Street".into(),
            zip: None,
        })
    );

    let state = fire(&form, state, "contact-f0", "change", "email");
    assert_eq!(form.extract(&state), Contact::Email("ada@example.org".into()));
}
