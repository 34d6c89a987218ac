// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The technology rule set: one transformation per technology category.
//!
//! Each rule takes the technology profile, the node's parameters and the
//! merged inbound stream, and returns the node's output stream and metrics.
//! Rules are pure; the same input always gives the same output.

mod byproduct;
mod digester;
mod enduse;
mod feedstock;
mod params;
mod pretreatment;
mod upgrading;

use crate::{Error, Node, Stream, TechnologyCategory, TechnologyProfile};

use super::NodeMetrics;
use params::Params;

/// What a rule produces for one node.
#[derive(Debug, PartialEq)]
pub(crate) struct RuleOutput {
    pub(crate) stream: Stream,
    pub(crate) metrics: NodeMetrics,
}

impl RuleOutput {
    fn new(stream: Stream, metrics: NodeMetrics) -> Self {
        Self { stream, metrics }
    }

    /// The output of terminal technologies, which emit nothing.
    fn terminal(metrics: NodeMetrics) -> Self {
        Self::new(Stream::empty(), metrics)
    }
}

/// Applies the rule of the profile's category to the merged `input` stream.
pub(crate) fn apply(
    profile: &TechnologyProfile,
    node: &dyn Node,
    input: &Stream,
) -> Result<RuleOutput, Error> {
    let params = Params::new(profile, node);

    match &profile.category {
        TechnologyCategory::Feedstock => feedstock::FeedstockRule::try_new(&params)?.apply(),
        TechnologyCategory::Pretreatment => {
            pretreatment::PretreatmentRule::try_new(&params)?.apply(input)
        }
        TechnologyCategory::Digester => digester::DigesterRule::try_new(&params)?.apply(input),
        TechnologyCategory::Upgrading => upgrading::UpgradingRule::try_new(&params)?.apply(input),
        TechnologyCategory::Enduse => enduse::apply(&params, input),
        TechnologyCategory::Byproduct => byproduct::apply(&params),
        TechnologyCategory::Unspecified(raw) => {
            tracing::warn!(
                "Technology {} has unknown category `{}`; node {} passes its input through.",
                profile.id,
                raw,
                node.node_id()
            );
            Ok(RuleOutput::new(*input, NodeMetrics::Empty))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::{catalog, TestNode};
    use crate::TechnologyLookup;

    #[test]
    fn test_unspecified_passes_through() -> Result<(), Error> {
        let catalog = catalog();
        let profile = catalog.technology("storage_tank").unwrap();
        let input = Stream {
            volume_flow: 1200.0,
            methane_content: 700.0,
            temperature: 40.0,
            ..Stream::empty()
        };

        let output = apply(profile, &TestNode::new("tank", "storage_tank"), &input)?;
        assert_eq!(output, RuleOutput::new(input, NodeMetrics::Empty));
        Ok(())
    }
}
