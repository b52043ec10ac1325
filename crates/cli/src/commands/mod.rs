pub(crate) mod eval;
pub(crate) mod expand;
pub(crate) mod replay;
