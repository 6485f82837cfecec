//! Lexical context of the translation descent.
//!
//! Tracks the nesting of enclosing definition bodies so that self-scoped
//! member definitions can be disambiguated. The context is an immutable
//! value threaded as a parameter through the recursion: descending into a
//! definition body recurses with an extended copy, so the frame is gone on
//! every exit path without any push/pop pairing. One context per top-level
//! translation call; nothing is shared across calls.

/// The lexical kind of an enclosing definition body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Class,
    SingletonClass,
    Module,
}

/// The stack of enclosing definition frames, outermost first.
#[derive(Debug, Clone, Default)]
pub struct Context {
    frames: Vec<Frame>,
}

impl Context {
    /// The top-level context: no enclosing definition.
    pub fn top() -> Self {
        Context::default()
    }

    /// This context extended by one frame.
    pub fn with(&self, frame: Frame) -> Self {
        let mut frames = self.frames.clone();
        frames.push(frame);
        Context { frames }
    }

    /// The innermost enclosing frame, if any.
    pub fn innermost(&self) -> Option<Frame> {
        self.frames.last().copied()
    }
}
