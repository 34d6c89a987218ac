// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Checks that the stream a connection carries is one its target accepts.

use std::collections::BTreeSet;

use crate::{Edge, Node, TechnologyLookup, TechnologyProfile};

use super::{RouteValidator, ValidationIssue};

impl<N, E, C> RouteValidator<'_, N, E, C>
where
    N: Node,
    E: Edge,
    C: TechnologyLookup + ?Sized,
{
    /// Checks one connection.  The source's output kinds must overlap the
    /// target's accepted kinds, unless the target accepts anything.
    pub(super) fn check_connection(&self, connection: &E) -> Option<ValidationIssue> {
        let edge = format!("{} -> {}", connection.source(), connection.target());

        let (source, target) = match (
            self.technology_of(connection.source()),
            self.technology_of(connection.target()),
        ) {
            (Ok(source), Ok(target)) => (source, target),
            (Err(missing), _) | (_, Err(missing)) => {
                return Some(ValidationIssue {
                    edge: Some(edge),
                    reason: "Unknown technology".to_string(),
                    details: Some(format!("Technology '{missing}' not found in catalog.")),
                });
            }
        };

        if target.accepts_any() {
            return None;
        }

        let outputs = source.outputs.iter().collect::<BTreeSet<_>>();
        let accepts = target.accepts.iter().collect::<BTreeSet<_>>();
        if outputs.is_disjoint(&accepts) {
            return Some(ValidationIssue {
                edge: Some(edge),
                reason: "Incompatible connection".to_string(),
                details: Some(format!(
                    "{} outputs {:?} but {} accepts {:?}",
                    source.name, outputs, target.name, accepts
                )),
            });
        }
        None
    }

    /// The technology of the node with the given id, or the missing
    /// technology id.
    fn technology_of(&self, node_id: &str) -> Result<&TechnologyProfile, String> {
        let node = self.rg.node(node_id).map_err(|err| err.to_string())?;
        self.catalog
            .technology(node.tech_id())
            .ok_or_else(|| node.tech_id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::test_utils::{catalog, RouteBuilder};
    use crate::graph::validation::validate;
    use crate::Error;

    #[test]
    fn test_incompatible_details() -> Result<(), Error> {
        let mut builder = RouteBuilder::new();
        let feed = builder.add("bagasse", &[]);
        let digester = builder.add("uasb", &[]);
        builder.connect(&feed, &digester);

        let report = validate(&builder.build()?, &catalog());
        assert_eq!(
            report.errors[0].details.as_deref(),
            Some(r#"bagasse outputs {"solid_biomass"} but uasb accepts {"liquid_organic"}"#)
        );
        Ok(())
    }

    #[test]
    fn test_target_accepting_anything() -> Result<(), Error> {
        let mut builder = RouteBuilder::new();
        let digester = builder.add("cstr", &[]);
        let tank = builder.add("storage_tank", &[]);
        let heat_pump = builder.add("heat_pump", &[]);
        builder.connect(&digester, &tank).connect(&digester, &heat_pump);

        let report = validate(&builder.build()?, &catalog());
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].edge.as_deref(), Some("cstr-0 -> heat_pump-2"));
        Ok(())
    }
}
