// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Diagnostic validation of a [`RouteGraph`] against a technology catalog.
//!
//! Unlike a balance, validation never fails fast: every problem found is
//! collected into a [`ValidationReport`].

mod compatibility;

use serde::Serialize;

use crate::{Edge, Error, Node, RouteGraph, TechnologyLookup};

/// One problem found while validating a route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// The offending connection as `"source -> target"`, or `None` when the
    /// route as a whole could not be built.
    pub edge: Option<String>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The outcome of validating a route.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub(crate) fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// A report for a route that failed to build.
    pub(crate) fn from_error(err: &Error) -> Self {
        Self::from_issues(vec![ValidationIssue {
            edge: None,
            reason: err.to_string(),
            details: None,
        }])
    }
}

pub(crate) struct RouteValidator<'a, N, E, C>
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    rg: &'a RouteGraph<N, E>,
    catalog: &'a C,
}

pub(crate) fn validate<N, E, C>(rg: &RouteGraph<N, E>, catalog: &C) -> ValidationReport
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    let validator = RouteValidator { rg, catalog };

    let mut issues = Vec::new();
    for connection in rg.connections() {
        if let Some(issue) = validator.check_connection(connection) {
            issues.push(issue);
        }
    }

    if !issues.is_empty() {
        tracing::debug!("Route validation found {} issue(s).", issues.len());
    }
    ValidationReport::from_issues(issues)
}
