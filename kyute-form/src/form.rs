//! Form definitions.
//!
//! A form is defined by registering widgets one after the other on a [`FormBuilder`]:
//!
//! ```
//! use kyute_form::{widgets::{Checkbox, TextInput}, FormBuilder, Layout, WidgetExt};
//!
//! struct Signup {
//!     name: String,
//!     newsletter: bool,
//! }
//!
//! let form = FormBuilder::<_, String>::new()
//!     .dom_id("signup")
//!     .field(TextInput::new().non_blank())
//!     .field(Checkbox::new())
//!     .build(|(name, newsletter)| {
//!         let (name2, newsletter2) = (name.clone(), newsletter.clone());
//!         Layout::new(
//!             move |state| Signup {
//!                 name: name.value(state),
//!                 newsletter: newsletter.value(state),
//!             },
//!             move |state| [name2.view(state), newsletter2.view(state)].concat(),
//!         )
//!     });
//!
//! let state = form.init();
//! assert_eq!(form.extract(&state).name, "");
//! ```
//!
//! Each registration assigns the next [`FieldId`] to the widget, records the widget's update function in the
//! dispatch table of the form, stores the serialized default model of the widget in the default state, extends
//! the blur chain, and appends a typed [`Field`] to the tuple of fields held by the builder. Since every
//! registration changes the type of the builder, the sequence of registrations of a form definition is fixed at
//! compile time: the same definition always assigns the same ids.
//!
//! The number of fields of a form is limited by the length of the tuples implementing [`Append`] (12).
//! Larger forms can be split into nested forms, which are widgets themselves.
use crate::{
    decorate::{Decorator, DefaultDecorator, ListDecoration, ViewCtx},
    environment::Environment,
    error::FieldError,
    field::{Field, ListSlot, ScalarSlot, Slot, TypedSlot},
    ids::FieldId,
    msg::FormMsg,
    node::{map_nodes, Node},
    state::FormState,
    status::FieldStatus,
    tuple::Append,
    variant::Variants,
    widget::{Update, Widget},
};
use serde_json::Value as Json;
use std::{collections::BTreeMap, fmt, rc::Rc};
use tracing::{debug, trace, warn};

type BlurFn = Rc<dyn Fn(FormState) -> FormState>;
type FormValidator<D, E> = Box<dyn Fn(&D) -> Vec<FieldError<E>>>;

/// DOM id of the root of a form, unless specified with [`FormBuilder::dom_id`].
pub const DEFAULT_DOM_ID: &str = "form";

/// How the fields of a form are combined into its output and its markup.
pub struct Layout<D> {
    combine: Box<dyn Fn(&FormState) -> D>,
    view: Box<dyn Fn(&FormState) -> Vec<Node<FormMsg>>>,
}

impl<D> Layout<D> {
    pub fn new(
        combine: impl Fn(&FormState) -> D + 'static,
        view: impl Fn(&FormState) -> Vec<Node<FormMsg>> + 'static,
    ) -> Layout<D> {
        Layout {
            combine: Box::new(combine),
            view: Box::new(view),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Accumulates the fields of a form.
///
/// `Fields` is the tuple of the [`Field`] accessors registered so far.
pub struct FormBuilder<Fields, E> {
    fields: Fields,
    next_id: FieldId,
    updates: BTreeMap<FieldId, Rc<dyn Slot<E>>>,
    defaults: FormState,
    blur: BlurFn,
    cx: Rc<ViewCtx<E>>,
}

impl<E: fmt::Display + 'static> FormBuilder<(), E> {
    /// Creates a builder using the [`DefaultDecorator`].
    pub fn new() -> Self {
        FormBuilder::with_decorator(DefaultDecorator)
    }
}

impl<E: fmt::Display + 'static> Default for FormBuilder<(), E> {
    fn default() -> Self {
        FormBuilder::new()
    }
}

impl<E: 'static> FormBuilder<(), E> {
    pub fn with_decorator(decorator: impl Decorator<E> + 'static) -> Self {
        FormBuilder {
            fields: (),
            next_id: FieldId::FIRST,
            updates: BTreeMap::new(),
            defaults: FormState::new(DEFAULT_DOM_ID),
            blur: Rc::new(|state: FormState| state),
            cx: Rc::new(ViewCtx::new(Environment::new(), Rc::new(decorator))),
        }
    }

    /// Sets the environment passed to decorators.
    ///
    /// Fields capture the environment when they are registered, which is why this is only available before the
    /// first field.
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.cx = Rc::new(ViewCtx::new(env, self.cx.decorator.clone()));
        self
    }

    /// Replaces the decorator. Only available before the first field, see [`FormBuilder::environment`].
    #[must_use]
    pub fn decorator(mut self, decorator: impl Decorator<E> + 'static) -> Self {
        self.cx = Rc::new(ViewCtx::new(self.cx.env.clone(), Rc::new(decorator)));
        self
    }
}

impl<Fields, E: 'static> FormBuilder<Fields, E> {
    /// Sets the DOM id of the root of the form.
    #[must_use]
    pub fn dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.defaults.set_parent_dom_id(dom_id);
        self
    }

    /// Registers a field.
    pub fn field<W>(self, widget: W) -> FormBuilder<Fields::Output, E>
    where
        W: Widget<Error = E> + 'static,
        Fields: Append<Field<W::Value, E>>,
    {
        self.register(ScalarSlot::new(widget), false)
    }

    /// Registers a list field, initially empty, with the default add/remove controls.
    pub fn list_field<W>(self, widget: W) -> FormBuilder<Fields::Output, E>
    where
        W: Widget<Error = E> + 'static,
        Fields: Append<Field<Vec<W::Value>, E>>,
    {
        self.list_field_with(widget, ListDecoration::default())
    }

    /// Registers a list field, initially empty, with custom add/remove controls.
    pub fn list_field_with<W>(self, widget: W, decoration: ListDecoration) -> FormBuilder<Fields::Output, E>
    where
        W: Widget<Error = E> + 'static,
        Fields: Append<Field<Vec<W::Value>, E>>,
    {
        self.register(ListSlot::new(widget, decoration, 0), true)
    }

    /// Registers a list field that initially holds `len` default elements.
    pub fn list_field_with_defaults<W>(self, widget: W, len: usize) -> FormBuilder<Fields::Output, E>
    where
        W: Widget<Error = E> + 'static,
        Fields: Append<Field<Vec<W::Value>, E>>,
    {
        self.register(ListSlot::new(widget, ListDecoration::default(), len), true)
    }

    /// Registers a field whose value comes from one of several sub-forms, chosen with `selector`.
    ///
    /// See [`Variants`].
    pub fn field_with_variants<S, D>(
        self,
        selector: S,
        first: (impl Into<String>, Form<D, E>),
        rest: impl IntoIterator<Item = (String, Form<D, E>)>,
    ) -> FormBuilder<Fields::Output, E>
    where
        S: Widget<Value = String, Error = E> + 'static,
        D: 'static,
        Fields: Append<Field<D, E>>,
    {
        self.field(Variants::new(selector, first, rest))
    }

    fn register<V, S>(self, slot: S, multiple: bool) -> FormBuilder<Fields::Output, E>
    where
        S: TypedSlot<V, E> + 'static,
        Fields: Append<Field<V, E>>,
    {
        let FormBuilder {
            fields,
            next_id: id,
            mut updates,
            mut defaults,
            blur: prev_blur,
            cx,
        } = self;

        let slot = Rc::new(slot);
        defaults.insert_default(id, slot.default_value());
        let untyped: Rc<dyn Slot<E>> = slot.clone();
        updates.insert(id, untyped.clone());
        let blur: BlurFn = Rc::new(move |state: FormState| blur_field(id, &*untyped, prev_blur(state)));
        trace!(field = ?id, multiple, "registered field");

        let field = Field::new(id, multiple, slot, cx.clone());
        FormBuilder {
            fields: fields.append(field),
            next_id: id.next(),
            updates,
            defaults,
            blur,
            cx,
        }
    }

    /// Finishes the definition of the form.
    ///
    /// `layout` receives the tuple of registered fields, in registration order.
    pub fn build<D>(self, layout: impl FnOnce(Fields) -> Layout<D>) -> Form<D, E> {
        let layout = layout(self.fields);
        debug!(fields = self.updates.len(), dom_id = self.defaults.parent_dom_id(), "form defined");
        Form {
            layout,
            updates: self.updates,
            defaults: self.defaults,
            blur: self.blur,
            validators: Vec::new(),
            cx: self.cx,
        }
    }
}

fn blur_field<E>(id: FieldId, slot: &dyn Slot<E>, mut state: FormState) -> FormState {
    let value = slot.blur(state.raw(id));
    let status = state.status(id).join(FieldStatus::Blurred);
    state.set(id, value, status);
    state
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A form definition.
///
/// Forms don't hold any state. The host application creates a [`FormState`] with [`Form::init`], feeds it back to
/// [`Form::update`] with the messages produced by [`Form::render`], and reads the result with
/// [`Form::extract`] or [`Form::result`].
///
/// Forms are also widgets, with `FormState` as model and `FormMsg` as message, so they can be nested in other
/// forms.
pub struct Form<D, E> {
    layout: Layout<D>,
    updates: BTreeMap<FieldId, Rc<dyn Slot<E>>>,
    defaults: FormState,
    blur: BlurFn,
    validators: Vec<FormValidator<D, E>>,
    cx: Rc<ViewCtx<E>>,
}

impl<D, E> fmt::Debug for Form<D, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.updates.keys().collect::<Vec<_>>())
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl<D, E> Form<D, E> {
    /// Adds a validator over the output of the whole form.
    #[must_use]
    pub fn validator(mut self, validator: impl Fn(&D) -> Vec<FieldError<E>> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Number of registered fields.
    pub fn field_count(&self) -> usize {
        self.updates.len()
    }

    pub fn environment(&self) -> &Environment {
        &self.cx.env
    }

    /// Initial state of the form.
    pub fn init(&self) -> FormState {
        self.defaults.clone()
    }

    /// Reads a persisted state. Fields missing from `value` get their default value.
    pub fn decode_state(&self, value: &Json) -> FormState {
        let mut state = FormState::decode(value);
        for field in self.defaults.fields() {
            if !state.contains(field) {
                state.insert_default(field, self.defaults.raw(field).clone());
            }
        }
        if state.parent_dom_id().is_empty() {
            state.set_parent_dom_id(self.defaults.parent_dom_id());
        }
        state
    }

    /// Applies a message to the state.
    pub fn update(&self, msg: FormMsg, state: FormState) -> FormState {
        self.dispatch(msg, state).model
    }

    /// Applies a message to the state, and returns its effect on the addressed field.
    ///
    /// Messages addressed to fields that this form doesn't have leave the state untouched.
    pub fn dispatch(&self, msg: FormMsg, mut state: FormState) -> Update<FormState> {
        let FormMsg { field, subfield, op } = msg;
        let Some(slot) = self.updates.get(&field) else {
            warn!(
                "message for unknown field {field:?} dropped (form has {} fields)",
                self.updates.len()
            );
            return Update::none(state);
        };

        let Update { model, effect } = slot.update(subfield, &op, state.raw(field));
        let status = state.status(field).apply(effect);
        trace!(field = ?field, ?subfield, op = op.kind(), ?effect, ?status, "dispatch");
        state.set(field, model, status);
        Update::new(state, effect)
    }

    /// Output of the form, regardless of validation errors.
    pub fn extract(&self, state: &FormState) -> D {
        (self.layout.combine)(state)
    }

    /// Errors of the validators of the whole form.
    pub fn form_errors(&self, state: &FormState) -> Vec<FieldError<E>> {
        if self.validators.is_empty() {
            return Vec::new();
        }
        let data = self.extract(state);
        self.validators.iter().flat_map(|validator| validator(&data)).collect()
    }

    /// All validation errors: those of every field, then those of the form.
    pub fn errors(&self, state: &FormState) -> Vec<FieldError<E>> {
        let mut errors: Vec<_> = self
            .updates
            .iter()
            .flat_map(|(field, slot)| slot.errors(state.raw(*field)))
            .collect();
        errors.extend(self.form_errors(state));
        errors
    }

    /// Output of the form if it is valid, otherwise all its errors.
    pub fn result(&self, state: &FormState) -> Result<D, Vec<FieldError<E>>> {
        let errors = self.errors(state);
        if errors.is_empty() {
            Ok(self.extract(state))
        } else {
            Err(errors)
        }
    }

    /// Marks every field, and everything nested in them, as visited.
    ///
    /// Typically called when the user attempts to submit the form, to reveal all errors.
    pub fn blur_all(&self, state: FormState) -> FormState {
        (self.blur)(state)
    }

    /// Whether the user has interacted with any field.
    pub fn is_changed(&self, state: &FormState) -> bool {
        self.updates.keys().any(|field| state.status(*field) > FieldStatus::NotVisited)
    }

    /// Whether every field of the form has been visited.
    pub fn is_blurred(&self, state: &FormState) -> bool {
        self.updates.keys().all(|field| state.status(*field).shows_errors())
    }

    pub(crate) fn view_nodes(&self, state: &FormState) -> Vec<Node<FormMsg>> {
        let content = (self.layout.view)(state);
        // form-level errors are only meaningful once the user has gone through every field
        let errors = if self.is_blurred(state) {
            self.form_errors(state)
        } else {
            Vec::new()
        };
        self.cx.decorator.form(&self.cx.env, state.parent_dom_id(), content, &errors)
    }

    /// Renders the form, converting its messages with `map`.
    pub fn render<M: 'static>(&self, state: &FormState, map: impl Fn(FormMsg) -> M + 'static) -> Vec<Node<M>> {
        map_nodes(self.view_nodes(state), map)
    }
}

impl<D, E> Widget for Form<D, E> {
    type Model = FormState;
    type Msg = FormMsg;
    type Value = D;
    type Error = E;

    fn init(&self) -> FormState {
        self.defaults.clone()
    }

    fn value(&self, model: &FormState) -> D {
        self.extract(model)
    }

    fn validate(&self, model: &FormState) -> Vec<FieldError<E>> {
        self.errors(model)
    }

    fn reports_own_errors(&self) -> bool {
        true
    }

    fn view(&self, dom_id: &str, model: &FormState) -> Vec<Node<FormMsg>> {
        let state = model.clone().with_parent_dom_id(dom_id);
        self.view_nodes(&state)
    }

    fn update(&self, msg: FormMsg, model: FormState) -> Update<FormState> {
        self.dispatch(msg, model)
    }

    fn blur(&self, model: FormState) -> FormState {
        self.blur_all(model)
    }

    fn encode_model(&self, model: &FormState) -> Json {
        model.encode()
    }

    fn decode_model(&self, value: &Json) -> FormState {
        self.decode_state(value)
    }
}
