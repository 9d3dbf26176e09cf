use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, EnumIter, EnumString, Display, IntoStaticStr)]
pub enum UnaryOp {
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Neg,
    #[strum(serialize = "++")]
    Increment,
    #[strum(serialize = "--")]
    Decrement,
    #[strum(serialize = "!")]
    Factorial,
    #[strum(serialize = "@")]
    Hash,
    #[strum(serialize = "=")]
    Copy,
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, EnumIter, EnumString, Display, IntoStaticStr)]
pub enum BinaryOp {
    #[strum(serialize = ";")]
    Sequence,
    #[strum(serialize = "=")]
    Assign,

    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Neq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Leq,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Geq,

    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Mod,
    #[strum(serialize = "^")]
    Pow,
}

/// The bracket pair that delimited a composite's argument list.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, EnumIter)]
pub enum Bracket {
    Round,
    Square,
    Curly,
}

impl Bracket {
    pub fn symbols(self) -> (&'static str, &'static str) {
        match self {
            Self::Round => ("(", ")"),
            Self::Square => ("[", "]"),
            Self::Curly => ("{", "}"),
        }
    }
}
