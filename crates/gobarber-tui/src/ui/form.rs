//! Text fields and the form that owns them.
//!
//! A field keeps its own draft value and visual state (focused, filled,
//! errored). The only thing a parent may do to a field directly is move
//! focus to it, through the `Focusable` capability.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use gobarber_core::forms::{can_add_char, FormData, ValidationErrors};

/// Narrow capability a field hands to its parent
pub trait Focusable {
    fn focus(&mut self);
}

#[derive(Debug, Clone)]
pub struct TextField {
    name: &'static str,
    label: &'static str,
    value: String,
    secure: bool,
    focused: bool,
    filled: bool,
    error: Option<String>,
}

impl TextField {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: String::new(),
            secure: false,
            focused: false,
            filled: false,
            error: None,
        }
    }

    /// Mask the value when drawn
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set when the field loses focus with a value in it
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Text to draw: the value, or one `*` per character when secure
    pub fn display_value(&self) -> String {
        if self.secure {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.filled = !self.value.is_empty();
    }

    pub fn clear_value(&mut self) {
        self.value.clear();
        self.filled = false;
    }

    fn blur(&mut self) {
        self.focused = false;
        self.filled = !self.value.is_empty();
    }

    fn push_char(&mut self, c: char) {
        if can_add_char(self.name, self.value.chars().count(), c) {
            self.value.push(c);
        }
    }

    fn pop_char(&mut self) {
        self.value.pop();
    }
}

impl Focusable for TextField {
    fn focus(&mut self) {
        self.focused = true;
    }
}

/// What the focus ring of a form currently points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(usize),
    Submit,
    Link,
}

/// Result of feeding a key to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    FollowLink,
}

#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<TextField>,
    focus: FormFocus,
    submit_label: &'static str,
    link_label: &'static str,
}

impl Form {
    pub fn new(fields: Vec<TextField>, submit_label: &'static str, link_label: &'static str) -> Self {
        let mut form = Self {
            fields,
            focus: FormFocus::Submit,
            submit_label,
            link_label,
        };
        if let Some(first) = form.fields.first().map(|f| f.name) {
            form.focus_field(first);
        }
        form
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&TextField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub fn submit_label(&self) -> &'static str {
        self.submit_label
    }

    pub fn link_label(&self) -> &'static str {
        self.link_label
    }

    /// Hand out the focus capability of a field, and nothing else
    fn focus_handle(&mut self, name: &str) -> Option<&mut dyn Focusable> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| f as &mut dyn Focusable)
    }

    fn blur_all(&mut self) {
        for field in &mut self.fields {
            if field.focused {
                field.blur();
            }
        }
    }

    pub fn focus_field(&mut self, name: &str) {
        let Some(index) = self.fields.iter().position(|f| f.name == name) else {
            return;
        };
        self.blur_all();
        if let Some(handle) = self.focus_handle(name) {
            handle.focus();
        }
        self.focus = FormFocus::Field(index);
    }

    fn set_focus(&mut self, focus: FormFocus) {
        match focus {
            FormFocus::Field(index) => {
                if let Some(name) = self.fields.get(index).map(|f| f.name) {
                    self.focus_field(name);
                }
            }
            other => {
                self.blur_all();
                self.focus = other;
            }
        }
    }

    /// Focus ring: fields in order, then submit, then link, then back to the top
    fn next_focus(&self) -> FormFocus {
        match self.focus {
            FormFocus::Field(i) if i + 1 < self.fields.len() => FormFocus::Field(i + 1),
            FormFocus::Field(_) => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Link,
            FormFocus::Link if self.fields.is_empty() => FormFocus::Submit,
            FormFocus::Link => FormFocus::Field(0),
        }
    }

    fn prev_focus(&self) -> FormFocus {
        match self.focus {
            FormFocus::Field(0) => FormFocus::Link,
            FormFocus::Field(i) => FormFocus::Field(i - 1),
            FormFocus::Submit if self.fields.is_empty() => FormFocus::Link,
            FormFocus::Submit => FormFocus::Field(self.fields.len() - 1),
            FormFocus::Link => FormFocus::Submit,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Down | KeyCode::Tab => self.set_focus(self.next_focus()),
            KeyCode::Up | KeyCode::BackTab => self.set_focus(self.prev_focus()),
            KeyCode::Enter => match self.focus {
                // Return key on a field moves on; on the last field it sends
                FormFocus::Field(i) if i + 1 < self.fields.len() => {
                    self.set_focus(FormFocus::Field(i + 1));
                }
                FormFocus::Field(_) | FormFocus::Submit => return FormAction::Submit,
                FormFocus::Link => return FormAction::FollowLink,
            },
            KeyCode::Backspace => {
                if let FormFocus::Field(i) = self.focus {
                    if let Some(field) = self.fields.get_mut(i) {
                        field.pop_char();
                    }
                }
            }
            // Ctrl and Alt chords are shortcuts, not text
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                if let FormFocus::Field(i) = self.focus {
                    if let Some(field) = self.fields.get_mut(i) {
                        field.push_char(c);
                    }
                }
            }
            _ => {}
        }
        FormAction::None
    }

    /// Current draft values keyed by field name
    pub fn data(&self) -> FormData {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), f.value.clone()))
            .collect()
    }

    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.set_value(value);
        }
    }

    pub fn clear_value(&mut self, name: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.clear_value();
        }
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Attach messages to their fields and focus the first errored one
    pub fn set_errors(&mut self, errors: &ValidationErrors) {
        for field in &mut self.fields {
            field.error = None;
        }
        for (name, message) in errors.iter() {
            if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
                field.error = Some(message.to_string());
            }
        }
        if let Some(name) = self.fields.iter().find(|f| f.error.is_some()).map(|f| f.name) {
            self.focus_field(name);
        }
    }

    /// Empty every field, drop errors and focus the first field
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear_value();
            field.error = None;
        }
        if let Some(first) = self.fields.first().map(|f| f.name) {
            self.focus_field(first);
        }
    }
}
