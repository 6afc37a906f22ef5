//! Semantic builder - replays signals into a nested [`Value`].
//!
//! The builder keeps a stack of open array contexts. The top of the
//! stack is the only active context; its parent is simply the entry
//! below it, so no back-references are needed.

use crate::error::Defect;
use crate::event::Signal;
use crate::value::Value;

/// Elements collected for one open array.
#[derive(Debug, Default)]
struct ArrayContext<'a> {
    elements: Vec<Value<'a>>,
}

/// Assembles a value from `PushArray` / `AddElement` / `PopArray` signals.
#[derive(Debug, Default)]
pub struct ValueBuilder<'a> {
    stack: Vec<ArrayContext<'a>>,
    result: Option<Value<'a>>,
}

impl<'a> ValueBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open arrays.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn handle_signal(&mut self, signal: Signal<'a>) -> Result<(), Defect> {
        match signal {
            Signal::PushArray { .. } => {
                self.stack.push(ArrayContext::default());
            }
            Signal::AddElement { text, span } => {
                let top = self.stack.last_mut().ok_or(Defect::NoOpenArray(span))?;
                top.elements.push(Value::Leaf(text));
            }
            Signal::PopArray { span } => {
                let done = self.stack.pop().ok_or(Defect::StackUnderflow(span))?;
                let list = Value::List(done.elements);
                match self.stack.last_mut() {
                    Some(parent) => parent.elements.push(list),
                    None if self.result.is_some() => return Err(Defect::MultipleResults(span)),
                    None => self.result = Some(list),
                }
            }
        }
        Ok(())
    }

    /// Take the finished value. Every pushed array must have been popped.
    pub fn finish(self) -> Result<Value<'a>, Defect> {
        if !self.stack.is_empty() {
            return Err(Defect::UnclosedArrays(self.stack.len()));
        }
        self.result.ok_or(Defect::NoResult)
    }
}

/// Replay a signal sequence in one go.
pub fn build<'a>(signals: impl IntoIterator<Item = Signal<'a>>) -> Result<Value<'a>, Defect> {
    let mut builder = ValueBuilder::new();
    for signal in signals {
        builder.handle_signal(signal)?;
    }
    builder.finish()
}
