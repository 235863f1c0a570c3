//! Reference widgets.
mod checkbox;
mod formatted_input;
mod formatter;
mod select;
mod text_input;

pub use checkbox::{Checkbox, CheckboxMsg};
pub use formatted_input::{FormattedInput, FormattedInputMsg};
pub use formatter::{DisplayFormatter, FloatingPointNumberFormatter, Formatter, ValidationResult};
pub use select::{Select, SelectMsg};
pub use text_input::{TextInput, TextInputMsg};
