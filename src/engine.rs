use crate::{
    ast::{LogicalOp, Node},
    error::{DocumentError, Result},
    evaluator::{EvalOptions, Evaluator},
    parser,
    registry::TypeRegistry,
    serializer,
    value::Record,
};

/// One rule compilation context: a [`TypeRegistry`] plus evaluation options.
///
/// Rules parsed by the same engine must agree on attribute types; separate
/// engines never interact. `Engine` is `Send + Sync` and can be shared
/// between threads.
///
/// # Examples
///
/// ```
/// use rule_tree::{Engine, LogicalOp, Record, Value};
///
/// let engine = Engine::new();
/// let rule = engine
///     .combine(&["age > 30", "department = 'Sales'"], LogicalOp::And)
///     .unwrap();
///
/// let mut data = Record::new();
/// data.insert("age".into(), Value::Integer(35));
/// data.insert("department".into(), Value::from("Sales"));
/// assert_eq!(engine.evaluate(&rule, &data), Ok(true));
///
/// let stored = engine.serialize(&rule);
/// assert_eq!(engine.deserialize(&stored).unwrap(), rule);
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    registry: TypeRegistry,
    options: EvalOptions,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Engine {
            registry: TypeRegistry::new(),
            options,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    pub fn parse(&self, rule: &str) -> Result<Node> {
        parser::parse(rule, &self.registry)
    }

    pub fn combine<S: AsRef<str>>(&self, rules: &[S], operator: LogicalOp) -> Result<Node> {
        parser::combine(rules, operator, &self.registry)
    }

    pub fn evaluate(&self, node: &Node, data: &Record) -> Result<bool> {
        Evaluator::with_options(&self.registry, self.options).evaluate(node, data)
    }

    pub fn serialize(&self, node: &Node) -> serde_json::Value {
        serializer::serialize(node)
    }

    pub fn deserialize(&self, document: &serde_json::Value) -> std::result::Result<Node, DocumentError> {
        serializer::deserialize(document)
    }
}
