use kyute_form::{
    find, keys, text_content, Environment, FieldError, FieldId, FieldOperation, FieldStatus, Form, FormBuilder,
    FormMsg, FormState, Layout, Node, Strings, SubfieldId, WidgetExt, MAX_LIST_LEN,
    widgets::{Checkbox, TextInput},
};
use serde_json::{json, Value as Json};

fn tags_form() -> Form<(Vec<String>, bool), String> {
    FormBuilder::new()
        .dom_id("tags")
        .list_field(TextInput::new().non_blank())
        .field(Checkbox::new())
        .build(|(tags, public)| {
            let (tags2, public2) = (tags.clone(), public.clone());
            Layout::new(
                move |state| (tags.value(state), public.value(state)),
                move |state| {
                    let mut nodes = tags2.view(state);
                    nodes.extend(public2.view(state));
                    nodes
                },
            )
        })
}

/// Delivers an event to the element with the given id and applies the resulting message.
fn fire(
    form: &Form<(Vec<String>, bool), String>,
    state: FormState,
    dom_id: &str,
    event: &str,
    payload: &str,
) -> FormState {
    let view: Vec<Node<FormMsg>> = form.render(&state, |msg| msg);
    let element = find(&view, dom_id).unwrap_or_else(|| panic!("no element {dom_id}"));
    let msg = element.trigger(event, payload).unwrap_or_else(|| panic!("no {event} listener on {dom_id}"));
    form.update(msg, state)
}

#[test]
fn add_edit_remove() {
    let form = tags_form();
    let state = form.init();
    assert_eq!(form.extract(&state), (vec![], false));
    assert!(find(&form.render(&state, |m| m), "tags-f0-0").is_none());

    let state = fire(&form, state, "tags-f0-add", "click", "");
    let state = fire(&form, state, "tags-f0-0", "input", "rust");
    let state = fire(&form, state, "tags-f0-add", "click", "");
    let state = fire(&form, state, "tags-f0-1", "input", "forms");
    assert_eq!(form.extract(&state).0, vec!["rust".to_string(), "forms".to_string()]);
    assert_eq!(state.status(FieldId::from_u32(0)), FieldStatus::Changed);

    let state = fire(&form, state, "tags-f0-0-remove", "click", "");
    assert_eq!(form.extract(&state).0, vec!["forms".to_string()]);
    let view = form.render(&state, |m| m);
    assert_eq!(find(&view, "tags-f0-0").unwrap().attribute("value"), Some("forms"));
    assert!(find(&view, "tags-f0-1").is_none());
}

#[test]
fn out_of_range_remove_is_ignored() {
    let form = tags_form();
    let state = form.update(FormMsg::add(FieldId::from_u32(0), 0), form.init());
    let after = form.update(FormMsg::remove(FieldId::from_u32(0), 3), state.clone());
    assert_eq!(after, state);
}

#[test]
fn element_errors_are_collected() {
    let form = tags_form();
    let state = fire(&form, form.init(), "tags-f0-add", "click", "");
    let state = fire(&form, state, "tags-f0-add", "click", "");
    let state = fire(&form, state, "tags-f0-1", "input", "ok");
    assert_eq!(form.errors(&state), vec![FieldError::MustNotBeBlank]);
    assert!(form.result(&state).is_err());

    // hidden until the list is blurred
    assert!(find(&form.render(&state, |m| m), "tags-f0-errors").is_none());
    let state = fire(&form, state, "tags-f0-0", "blur", "");
    assert_eq!(state.status(FieldId::from_u32(0)), FieldStatus::Blurred);
    let view = form.render(&state, |m| m);
    assert_eq!(
        find(&view, "tags-f0-errors").unwrap().text_content(),
        "This field must not be blank"
    );
}

#[test]
fn default_elements() {
    let form: Form<Vec<bool>, String> = FormBuilder::new()
        .list_field_with_defaults(Checkbox::new().checked(true), 2)
        .build(|(flags,)| {
            let view = flags.clone();
            Layout::new(move |state| flags.value(state), move |state| view.view(state))
        });
    let state = form.init();
    assert_eq!(form.extract(&state), vec![true, true]);
    let state = form.update(FormMsg::add(FieldId::FIRST, 2), state);
    assert_eq!(form.extract(&state), vec![true, true, true]);
}

#[test]
fn localized_controls() {
    let env = Environment::new().add(
        Strings::new()
            .with(keys::ADD_ITEM, "Ajouter")
            .with(keys::REMOVE_ITEM, "Retirer")
            .with(keys::MUST_NOT_BE_BLANK, "Obligatoire"),
    );
    let form: Form<Vec<String>, String> = FormBuilder::new()
        .environment(env)
        .dom_id("l")
        .list_field(TextInput::new().non_blank())
        .build(|(items,)| {
            let view = items.clone();
            Layout::new(move |state| items.value(state), move |state| view.view(state))
        });
    let state = form.update(FormMsg::add(FieldId::FIRST, 0), form.init());
    let state = form.blur_all(state);
    let view = form.render(&state, |m| m);
    assert_eq!(find(&view, "l-f0-add").unwrap().text_content(), "Ajouter");
    assert_eq!(find(&view, "l-f0-0-remove").unwrap().text_content(), "Retirer");
    assert!(text_content(&view).contains("Obligatoire"));
}

fn set_tag(index: usize, text: &str) -> FormMsg {
    FormMsg::update(FieldId::FIRST, SubfieldId::ArrayElement(index), json!({ "Input": text }))
}

#[test]
fn huge_element_index_is_ignored() {
    let form = tags_form();
    let state = form.init();
    for index in [usize::MAX, MAX_LIST_LEN] {
        let msg = FormMsg::new(
            FieldId::FIRST,
            SubfieldId::ArrayElement(index),
            FieldOperation::Update(json!({ "Input": "x" })),
        );
        assert_eq!(form.update(msg, state.clone()), state);
    }
}

#[test]
fn garbage_update_does_not_grow_the_list() {
    let form = tags_form();
    let state = form.init();
    let msg = FormMsg::update(FieldId::FIRST, SubfieldId::ArrayElement(3), json!({ "garbage": 1 }));
    let after = form.update(msg, state.clone());
    assert_eq!(after, state);
    assert_eq!(after.raw(FieldId::FIRST), &json!([]));
}

#[test]
fn fields_stay_decodable_after_any_sequence() {
    let tags = FieldId::FIRST;
    let public = FieldId::from_u32(1);
    let sequences: Vec<Vec<FormMsg>> = vec![
        vec![FormMsg::add(tags, 0), set_tag(0, "a"), FormMsg::remove(tags, 0)],
        vec![set_tag(1, "next"), set_tag(5, "far"), FormMsg::remove(tags, 9)],
        vec![
            FormMsg::add(tags, 0),
            FormMsg::update(tags, SubfieldId::ArrayElement(0), json!(42)),
            FormMsg::update(tags, SubfieldId::SingleValue, json!({ "Input": "x" })),
            FormMsg::new(tags, SubfieldId::SingleValue, FieldOperation::Add),
        ],
        vec![
            set_tag(usize::MAX, "x"),
            set_tag(MAX_LIST_LEN, "x"),
            FormMsg::remove(tags, usize::MAX),
            FormMsg::add(tags, usize::MAX),
        ],
        vec![
            FormMsg::update(public, SubfieldId::SingleValue, json!("Toggle")),
            FormMsg::update(public, SubfieldId::SingleValue, json!(["not", "a", "message"])),
            FormMsg::new(public, SubfieldId::ArrayElement(0), FieldOperation::Remove),
            FormMsg::add(public, 0),
        ],
        vec![
            FormMsg::update(FieldId::from_u32(7), SubfieldId::SingleValue, json!("Toggle")),
            FormMsg::add(FieldId::from_u32(2), 0),
            set_tag(0, "after"),
            FormMsg::remove(tags, 0),
            FormMsg::remove(tags, 0),
        ],
    ];

    let form = tags_form();
    for (i, sequence) in sequences.into_iter().enumerate() {
        let mut state = form.init();
        for msg in sequence {
            state = form.update(msg, state);
            let items = state.raw(tags).as_array();
            assert!(
                items.is_some_and(|items| items.iter().all(Json::is_string)),
                "sequence {i}: tags field holds {}",
                state.raw(tags)
            );
            assert!(state.raw(public).is_boolean(), "sequence {i}: public field holds {}", state.raw(public));
            assert_eq!(state.fields().count(), 2, "sequence {i}");
        }
        // extraction reads the stored models, not the fallbacks
        let (tags_value, _) = form.extract(&state);
        assert_eq!(tags_value.len(), state.raw(tags).as_array().map_or(0, Vec::len));
    }
}
