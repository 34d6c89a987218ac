// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Error` struct and the `ErrorKind` enum, which are
//! used to represent errors that can occur while building a route graph or
//! running a mass/energy balance over it.

/// A macro for defining the `ErrorKind` enum, the `Display` implementation for
/// it, and the constructors for the `Error` struct.
macro_rules! ErrorKind {
    ($(
        ($kind:ident, $ctor:ident)
    ),*) => {
        /// The kind of error that occurred.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum ErrorKind {
            $(
                $kind,
            )*
        }

        impl std::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$kind => write!(f, "{}", stringify!($kind)),
                    )*
                }
            }
        }

        /// Constructors for [`Error`].
        impl Error {
            $(
                #[doc = concat!(
                    "Creates a new [`Error`] with the `",
                    stringify!($kind),
                    "` kind and the given description."
                )]
                pub(crate) fn $ctor(desc: impl Into<String>) -> crate::Error {
                    Self {
                        kind: ErrorKind::$kind,
                        desc: desc.into(),
                    }
                }
            )*
        }
    };
}

ErrorKind!(
    (CycleDetected, cycle_detected),
    (Internal, internal),
    (InvalidCatalog, invalid_catalog),
    (InvalidGraph, invalid_graph),
    (InvalidParameter, invalid_parameter),
    (InvalidRequest, invalid_request),
    (NodeNotFound, node_not_found),
    (ScenarioNotFound, scenario_not_found),
    (UnknownTechnology, unknown_technology)
);

/// An error that can occur during the creation of a
/// [RouteGraph][crate::RouteGraph] or during a calculation over it.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    desc: String,
}

impl Error {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable description of the error.
    pub fn description(&self) -> &str {
        &self.desc
    }

    /// Re-labels the error with the node that caused it, keeping its kind.
    pub(crate) fn at_node(self, node_id: &str, tech_id: &str) -> Self {
        Self {
            kind: self.kind,
            desc: format!("Node {node_id} ({tech_id}): {}", self.desc),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.desc)
    }
}

impl std::error::Error for Error {}
