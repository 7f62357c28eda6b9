//! # Composition locals
//!
//! Values that flow down the tree while it is being built, without being
//! threaded through every constructor. The only one the side reveal needs
//! is the text direction, which decides where the *leading* edge is.
//!
//! ```rust
//! use sidereveal_core::*;
//!
//! assert_eq!(text_direction(), TextDirection::Ltr);
//! with_text_direction(TextDirection::Rtl, || {
//!     assert_eq!(text_direction(), TextDirection::Rtl);
//! });
//! ```

use std::cell::RefCell;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

thread_local! {
    static DIRECTION_STACK: RefCell<Vec<TextDirection>> = const { RefCell::new(Vec::new()) };
}

struct PopOnDrop;

impl Drop for PopOnDrop {
    fn drop(&mut self) {
        DIRECTION_STACK.with(|st| {
            st.borrow_mut().pop();
        });
    }
}

pub fn with_text_direction<R>(dir: TextDirection, f: impl FnOnce() -> R) -> R {
    DIRECTION_STACK.with(|st| st.borrow_mut().push(dir));
    let _guard = PopOnDrop;
    f()
}

pub fn text_direction() -> TextDirection {
    DIRECTION_STACK.with(|st| st.borrow().last().copied().unwrap_or_default())
}
