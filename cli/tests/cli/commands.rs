pub(crate) mod common;
pub(crate) mod completions;
pub(crate) mod decode;
pub(crate) mod info;
pub(crate) mod inspect;
pub(crate) mod list;
