//! Field decoration.
//!
//! Decorators add the markup that surrounds the widgets of a form: error lists under fields, the root element
//! of the form, and the add/remove controls of list fields. They don't change how fields behave.
use crate::{
    environment::{keys, Environment},
    error::FieldError,
    msg::FormMsg,
    node::{Element, Node},
};
use std::{fmt, rc::Rc};

/// Wraps field and form markup together with their errors.
pub trait Decorator<E> {
    /// Decorates the markup of a field. `errors` only contains the errors that should be visible.
    fn field(
        &self,
        env: &Environment,
        dom_id: &str,
        content: Vec<Node<FormMsg>>,
        errors: &[FieldError<E>],
    ) -> Vec<Node<FormMsg>>;

    /// Decorates the markup of a whole form. `errors` contains the visible form-level errors.
    fn form(
        &self,
        env: &Environment,
        dom_id: &str,
        content: Vec<Node<FormMsg>>,
        errors: &[FieldError<E>],
    ) -> Vec<Node<FormMsg>>;
}

/// Default decorator: a `div` per field followed by a list of errors.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultDecorator;

impl<E: fmt::Display> Decorator<E> for DefaultDecorator {
    fn field(
        &self,
        env: &Environment,
        dom_id: &str,
        content: Vec<Node<FormMsg>>,
        errors: &[FieldError<E>],
    ) -> Vec<Node<FormMsg>> {
        let mut field = Element::new("div").class("field").children(content);
        if !errors.is_empty() {
            field = field.child(error_list(env, &format!("{dom_id}-errors"), errors));
        }
        vec![field.into()]
    }

    fn form(
        &self,
        env: &Environment,
        dom_id: &str,
        content: Vec<Node<FormMsg>>,
        errors: &[FieldError<E>],
    ) -> Vec<Node<FormMsg>> {
        let mut form = Element::new("div").id(dom_id).class("form").children(content);
        if !errors.is_empty() {
            form = form.child(error_list(env, &format!("{dom_id}-errors"), errors));
        }
        vec![form.into()]
    }
}

/// Decorator that leaves markup untouched and doesn't render errors.
#[derive(Copy, Clone, Debug, Default)]
pub struct Undecorated;

impl<E> Decorator<E> for Undecorated {
    fn field(
        &self,
        _env: &Environment,
        _dom_id: &str,
        content: Vec<Node<FormMsg>>,
        _errors: &[FieldError<E>],
    ) -> Vec<Node<FormMsg>> {
        content
    }

    fn form(
        &self,
        _env: &Environment,
        _dom_id: &str,
        content: Vec<Node<FormMsg>>,
        _errors: &[FieldError<E>],
    ) -> Vec<Node<FormMsg>> {
        content
    }
}

/// Returns the user-facing text of an error.
pub fn error_text<E: fmt::Display>(env: &Environment, error: &FieldError<E>) -> String {
    match error {
        FieldError::MustNotBeBlank => env
            .strings()
            .get_or(keys::MUST_NOT_BE_BLANK, "This field must not be blank")
            .to_owned(),
        FieldError::Custom(e) => e.to_string(),
    }
}

fn error_list<E: fmt::Display>(env: &Environment, dom_id: &str, errors: &[FieldError<E>]) -> Element<FormMsg> {
    Element::new("ul")
        .id(dom_id)
        .class("errors")
        .children(
            errors
                .iter()
                .map(|error| Element::new("li").text(error_text(env, error)).into()),
        )
}

////////////////////////////////////////////////////////////////////////////////////////////////////

type AddFn = dyn Fn(&Environment, &str, FormMsg, Vec<Node<FormMsg>>) -> Vec<Node<FormMsg>>;
type RemoveFn = dyn Fn(&Environment, &str, FormMsg, Vec<Node<FormMsg>>) -> Vec<Node<FormMsg>>;

/// Markup around the elements of a list field.
///
/// * `add` wraps the whole list. It receives the DOM id of the field, the message that appends an element, and
///   the already decorated elements.
/// * `remove` wraps each element. It receives the DOM id of the element, the message that removes it, and the
///   element's markup.
#[derive(Clone)]
pub struct ListDecoration {
    pub(crate) add: Rc<AddFn>,
    pub(crate) remove: Rc<RemoveFn>,
}

impl ListDecoration {
    pub fn new(
        add: impl Fn(&Environment, &str, FormMsg, Vec<Node<FormMsg>>) -> Vec<Node<FormMsg>> + 'static,
        remove: impl Fn(&Environment, &str, FormMsg, Vec<Node<FormMsg>>) -> Vec<Node<FormMsg>> + 'static,
    ) -> ListDecoration {
        ListDecoration {
            add: Rc::new(add),
            remove: Rc::new(remove),
        }
    }
}

impl Default for ListDecoration {
    fn default() -> Self {
        ListDecoration::new(
            |env, dom_id, add, items| {
                let strings = env.strings();
                vec![Element::new("div")
                    .id(dom_id)
                    .class("list")
                    .children(items)
                    .child(
                        Element::new("button")
                            .id(format!("{dom_id}-add"))
                            .class("add")
                            .on("click", add)
                            .text(strings.get_or(keys::ADD_ITEM, "Add")),
                    )
                    .into()]
            },
            |env, dom_id, remove, content| {
                let strings = env.strings();
                vec![Element::new("div")
                    .class("list-item")
                    .children(content)
                    .child(
                        Element::new("button")
                            .id(format!("{dom_id}-remove"))
                            .class("remove")
                            .on("click", remove)
                            .text(strings.get_or(keys::REMOVE_ITEM, "Remove")),
                    )
                    .into()]
            },
        )
    }
}

impl fmt::Debug for ListDecoration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ListDecoration").finish_non_exhaustive()
    }
}

/// Environment and decorator shared by the fields of one form.
pub(crate) struct ViewCtx<E> {
    pub(crate) env: Environment,
    pub(crate) decorator: Rc<dyn Decorator<E>>,
}

impl<E> ViewCtx<E> {
    pub(crate) fn new(env: Environment, decorator: Rc<dyn Decorator<E>>) -> ViewCtx<E> {
        ViewCtx { env, decorator }
    }
}
