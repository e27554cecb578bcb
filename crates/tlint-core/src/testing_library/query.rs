use std::fmt;

/// Family of a query accessor, read from the prefix of its name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryFamily {
    /// `getBy*`, `getAllBy*`: throw when nothing matches.
    Get,
    /// `findBy*`, `findAllBy*`: reject when nothing matches.
    Find,
    /// `queryBy*`, `queryAllBy*`: return null or an empty array.
    Query,
    Unknown,
}

// Longer prefixes first so that `getAllBy` is not read as `get` + `AllBy`.
const PREFIXES: &[(&str, QueryFamily)] = &[
    ("getAllBy", QueryFamily::Get),
    ("getBy", QueryFamily::Get),
    ("findAllBy", QueryFamily::Find),
    ("findBy", QueryFamily::Find),
    ("queryAllBy", QueryFamily::Query),
    ("queryBy", QueryFamily::Query),
];

impl QueryFamily {
    /// `getByText` is `Get`, `queryAllByRole` is `Query`. A prefix alone
    /// (`getBy`) or any other name is `Unknown`.
    pub fn from_name(name: &str) -> Self {
        PREFIXES
            .iter()
            .find(|(prefix, _)| name.len() > prefix.len() && name.starts_with(prefix))
            .map_or(QueryFamily::Unknown, |(_, family)| *family)
    }

    /// Whether the query asserts that an element is present, which makes it
    /// unsuitable for waiting on its disappearance.
    pub fn asserts_presence(self) -> bool {
        matches!(self, QueryFamily::Get | QueryFamily::Find)
    }
}

impl fmt::Display for QueryFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryFamily::Get => "get",
            QueryFamily::Find => "find",
            QueryFamily::Query => "query",
            QueryFamily::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// A resolved query accessor such as `getByText`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryAccessor {
    name: String,
    family: QueryFamily,
}

impl QueryAccessor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let family = QueryFamily::from_name(&name);
        Self { name, family }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> QueryFamily {
        self.family
    }

    /// The name without its leading lowercase verb: `ByText` for `getByText`,
    /// `AllByRole` for `findAllByRole`.
    pub fn stem(&self) -> &str {
        let verb_len = self
            .name
            .find(|c: char| !c.is_ascii_lowercase())
            .unwrap_or(self.name.len());
        &self.name[verb_len..]
    }
}
