//! Document transforms and key handling

pub mod key_rewrite;
pub mod transform;

pub use key_rewrite::KeyRewrite;
pub use transform::{
    blank_target, copy_source_to_target, merge, set_languages, swap_source_target, KEEP,
};
