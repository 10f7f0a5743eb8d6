use std::fmt;
use std::str::FromStr;

/// The three scalar types a variable, parameter or array element may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdType {
    Integer,
    Boolean,
    Char,
}

impl StdType {
    pub fn to_type(self) -> Type {
        match self {
            StdType::Integer => Type::Int,
            StdType::Boolean => Type::Bool,
            StdType::Char => Type::Char,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            StdType::Integer => "integer",
            StdType::Boolean => "boolean",
            StdType::Char => "char",
        }
    }
}

impl fmt::Display for StdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Type descriptor attached to every declared name and every expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Char,
    Bool,
    Array { element: StdType, size: u16 },
    /// Parameter types in declaration order.
    Procedure(Vec<Type>),
    Error,
}

impl Type {
    /// The scalar view of this type, if it is one of the standard types.
    pub fn as_std(&self) -> Option<StdType> {
        match self {
            Type::Int => Some(StdType::Integer),
            Type::Bool => Some(StdType::Boolean),
            Type::Char => Some(StdType::Char),
            _ => None,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.as_std().is_some()
    }

    pub fn element_type(&self) -> Option<Type> {
        match self {
            Type::Array { element, .. } => Some(element.to_type()),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "integer"),
            Type::Char => write!(f, "char"),
            Type::Bool => write!(f, "boolean"),
            Type::Array { element, size } => write!(f, "array[{}] of {}", size, element),
            Type::Procedure(params) if params.is_empty() => write!(f, "procedure"),
            Type::Procedure(params) => {
                write!(f, "procedure(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")")
            }
            Type::Error => write!(f, "<error>"),
        }
    }
}

impl FromStr for StdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "integer" => Ok(StdType::Integer),
            "boolean" => Ok(StdType::Boolean),
            "char" => Ok(StdType::Char),
            other => Err(format!("unknown standard type '{}'", other)),
        }
    }
}

/// Inverse of `Display`, used when reading the symbol interchange format.
impl FromStr for Type {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("array[") {
            let (size, element) = rest
                .split_once("] of ")
                .ok_or_else(|| format!("malformed array type '{}'", s))?;
            let size = size
                .parse::<u16>()
                .map_err(|e| format!("bad array size in '{}': {}", s, e))?;
            return Ok(Type::Array { element: element.parse()?, size });
        }
        if s == "procedure" {
            return Ok(Type::Procedure(Vec::new()));
        }
        if let Some(rest) = s.strip_prefix("procedure(") {
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| format!("malformed procedure type '{}'", s))?;
            let params = inner
                .split(',')
                .map(|p| p.parse::<StdType>().map(StdType::to_type))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Type::Procedure(params));
        }
        s.parse::<StdType>().map(StdType::to_type)
    }
}
