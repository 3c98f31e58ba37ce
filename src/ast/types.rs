use std::fmt::Display;

/// The data types a Minipar value can have.
///
/// `Any` is the escape hatch: it is compatible with every other type
/// and is the declared type of values whose type cannot be determined
/// statically (for example the result of `input()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Number,
    String,
    Bool,
    Void,
    List,
    Dict,
    Any,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::List => write!(f, "list"),
            Type::Dict => write!(f, "dict"),
            Type::Any => write!(f, "any"),
        }
    }
}

/// Whether a channel declaration names the serving or the connecting end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Server,
    Client,
}

impl Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Server => write!(f, "s_channel"),
            ChannelKind::Client => write!(f, "c_channel"),
        }
    }
}
