// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the traits that need to be implemented by the types
//! that represent a process node and a connection.

/**
This trait needs to be implemented by the type that represents a process node.

The crate ships [`ProcessNode`][crate::ProcessNode], which implements it, but
callers that already have their own request types can implement it directly
and avoid a conversion.

<details>
<summary>Example implementation for a request type:</summary>

```ignore
impl bioroute_balance::Node for api::NodeInput {
    fn node_id(&self) -> &str {
        &self.node_id
    }

    fn tech_id(&self) -> &str {
        &self.tech_id
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).copied()
    }
}
```

</details>
*/
pub trait Node {
    /// Returns the unique identifier of the node.
    fn node_id(&self) -> &str;
    /// Returns the id of the technology profile the node is bound to.
    fn tech_id(&self) -> &str;
    /// Returns the user-supplied value of the given parameter, if any.
    fn parameter(&self, key: &str) -> Option<f64>;
}

/**
This trait needs to be implemented by the type that represents a connection.

<details>
<summary>Example implementation for a request type:</summary>

```ignore
impl bioroute_balance::Edge for api::EdgeInput {
    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        &self.target
    }
}
```

</details>
*/
pub trait Edge {
    /// Returns the id of the node the connection starts at.
    fn source(&self) -> &str;
    /// Returns the id of the node the connection ends at.
    fn target(&self) -> &str;
}
