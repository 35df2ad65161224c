mod builder;
mod kind;
mod option;

pub use builder::{PairArg, QueryValue};
pub use kind::{kind_name, KindError, OptionKind};
pub use option::{encode_value, QueryOption, QueryOptions};
