use std::fmt;

use dealsim_core::{Contract, Deal, Seat};

use crate::Condition;

/// A terminal choice: who plays what
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decision {
    pub contract: Contract,
    pub declarer: Seat,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.contract, self.declarer)
    }
}

/// Node of a decision tree. A branch always owns both children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionNode {
    Branch {
        condition: Condition,
        when_true: Box<DecisionNode>,
        when_false: Box<DecisionNode>,
    },
    Leaf(Decision),
}

impl DecisionNode {
    pub fn branch(condition: Condition, when_true: DecisionNode, when_false: DecisionNode) -> Self {
        DecisionNode::Branch {
            condition,
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        }
    }

    pub fn leaf(contract: Contract, declarer: Seat) -> Self {
        DecisionNode::Leaf(Decision { contract, declarer })
    }

    /// Walk from this node to a leaf
    pub fn evaluate(&self, deal: &Deal, reference: Seat) -> Decision {
        let mut node = self;
        loop {
            match node {
                DecisionNode::Leaf(decision) => return *decision,
                DecisionNode::Branch {
                    condition,
                    when_true,
                    when_false,
                } => {
                    node = if condition.evaluate(deal, reference) {
                        &**when_true
                    } else {
                        &**when_false
                    };
                }
            }
        }
    }

    /// Number of leaves under this node
    pub fn leaf_count(&self) -> usize {
        match self {
            DecisionNode::Leaf(_) => 1,
            DecisionNode::Branch {
                when_true,
                when_false,
                ..
            } => when_true.leaf_count() + when_false.leaf_count(),
        }
    }
}

/// A named decision tree with the seat its conditions read by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    name: String,
    seat: Seat,
    root: DecisionNode,
}

impl Strategy {
    pub fn new(name: impl Into<String>, seat: Seat, root: DecisionNode) -> Self {
        Strategy {
            name: name.into(),
            seat,
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference seat for conditions that don't name one
    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    /// Pure: the same deal always yields the same decision
    pub fn evaluate(&self, deal: &Deal) -> Decision {
        self.root.evaluate(deal, self.seat)
    }
}
