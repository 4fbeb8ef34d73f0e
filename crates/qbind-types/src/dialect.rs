use std::fmt;
use std::str::FromStr;

use qbind_error::BindError;
use serde::{Deserialize, Serialize};

/// Placeholder syntax of a SQL driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindDialect {
    /// Driver not recognised; placeholders are left as `?`.
    Unknown,
    /// `?` (MySQL, SQLite).
    #[default]
    Question,
    /// `$1`, `$2`, ... (PostgreSQL).
    Dollar,
    /// `:arg1`, `:arg2`, ... (Oracle).
    Named,
    /// `@p1`, `@p2`, ... (SQL Server).
    At,
}

impl BindDialect {
    /// Dialect used by a driver, keyed by its conventional name.
    pub fn for_driver(driver: &str) -> Self {
        match driver {
            "postgres" | "postgresql" | "pgx" | "pq-timeouts" | "cloudsqlpostgres" | "ql"
            | "nrpostgres" | "cockroach" => Self::Dollar,
            "mysql" | "sqlite" | "sqlite3" | "nrmysql" | "nrsqlite3" => Self::Question,
            "oci8" | "ora" | "goracle" | "godror" => Self::Named,
            "sqlserver" | "mssql" => Self::At,
            _ => Self::Unknown,
        }
    }

    /// Text written before the 1-based placeholder index, or `None` when
    /// the dialect keeps bare `?`.
    pub const fn numbered_prefix(self) -> Option<&'static str> {
        match self {
            Self::Unknown | Self::Question => None,
            Self::Dollar => Some("$"),
            Self::Named => Some(":arg"),
            Self::At => Some("@p"),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Question => "question",
            Self::Dollar => "dollar",
            Self::Named => "named",
            Self::At => "at",
        }
    }
}

impl fmt::Display for BindDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindDialect {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "question" | "?" => Ok(Self::Question),
            "dollar" | "$" => Ok(Self::Dollar),
            "named" | ":" => Ok(Self::Named),
            "at" | "@" => Ok(Self::At),
            _ => Err(BindError::UnknownDialect { name: s.to_owned() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_mapping() {
        assert_eq!(BindDialect::for_driver("postgres"), BindDialect::Dollar);
        assert_eq!(BindDialect::for_driver("pgx"), BindDialect::Dollar);
        assert_eq!(BindDialect::for_driver("sqlite3"), BindDialect::Question);
        assert_eq!(BindDialect::for_driver("godror"), BindDialect::Named);
        assert_eq!(BindDialect::for_driver("sqlserver"), BindDialect::At);
        assert_eq!(BindDialect::for_driver("duckdb"), BindDialect::Unknown);
    }

    #[test]
    fn parse_and_display() {
        for d in [
            BindDialect::Unknown,
            BindDialect::Question,
            BindDialect::Dollar,
            BindDialect::Named,
            BindDialect::At,
        ] {
            assert_eq!(d.to_string().parse::<BindDialect>(), Ok(d));
        }
        assert_eq!("$".parse::<BindDialect>(), Ok(BindDialect::Dollar));
        assert_eq!("AT".parse::<BindDialect>(), Ok(BindDialect::At));
    }

    #[test]
    fn parse_unknown_name_fails() {
        let err = "qmark".parse::<BindDialect>().unwrap_err();
        assert_eq!(
            err,
            BindError::UnknownDialect {
                name: "qmark".to_owned()
            }
        );
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&BindDialect::Dollar).unwrap();
        assert_eq!(json, "\"dollar\"");
        let d: BindDialect = serde_json::from_str("\"at\"").unwrap();
        assert_eq!(d, BindDialect::At);
    }

    #[test]
    fn prefixes() {
        assert_eq!(BindDialect::Question.numbered_prefix(), None);
        assert_eq!(BindDialect::Dollar.numbered_prefix(), Some("$"));
        assert_eq!(BindDialect::Named.numbered_prefix(), Some(":arg"));
        assert_eq!(BindDialect::At.numbered_prefix(), Some("@p"));
    }
}
