//! Regression Models

use crate::InferenceError;
use serde::{Deserialize, Serialize};

/// A fitted model mapping one feature row to a price
pub trait Regressor: Send + Sync {
    /// Short model family name, used in logs and errors
    fn kind(&self) -> &'static str;

    /// Number of input columns
    fn n_features(&self) -> usize;

    /// Column names seen during fit, if the artifact recorded them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Predict a single row
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;
}

fn check_width(expected: usize, features: &[f64]) -> Result<(), InferenceError> {
    if features.len() != expected {
        return Err(InferenceError::InvalidInputShape {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Ordinary least squares (or ridge/lasso) linear model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegression {
    /// Check internal consistency after deserialization
    pub fn check(&self) -> Result<(), String> {
        if let Some(names) = &self.feature_names {
            if names.len() != self.coefficients.len() {
                return Err(format!(
                    "model has {} feature names but {} coefficients",
                    names.len(),
                    self.coefficients.len()
                ));
            }
        }
        Ok(())
    }
}

impl Regressor for LinearRegression {
    fn kind(&self) -> &'static str {
        "linear_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        check_width(self.coefficients.len(), features)?;
        Ok(self.intercept
            + features
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>())
    }
}

/// A node in a flat tree. The root is node 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Go left when `features[feature] <= threshold`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn check(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= n_features {
                    return Err(format!(
                        "node {idx} splits on feature {feature}, model has {n_features}"
                    ));
                }
                // Children must come after their parent, so traversal always ends.
                for child in [*left, *right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(format!("node {idx} has invalid child {child}"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// How tree outputs are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Gradient boosting: base score plus every tree
    #[default]
    Sum,
    /// Random forest: base score plus the average tree
    Mean,
}

/// Boosted or bagged tree ensemble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub n_features: usize,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Check internal consistency after deserialization
    pub fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.n_features {
                return Err(format!(
                    "ensemble has {} feature names but n_features = {}",
                    names.len(),
                    self.n_features
                ));
            }
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.check(self.n_features)
                .map_err(|e| format!("tree {idx}: {e}"))?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        check_width(self.n_features, features)?;
        let total: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        let combined = match self.aggregation {
            Aggregation::Sum => total,
            Aggregation::Mean => total / self.trees.len() as f64,
        };
        Ok(self.base_score + combined)
    }
}
