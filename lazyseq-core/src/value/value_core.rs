use std::collections::BTreeMap;
use std::rc::Rc;

/// A value that can flow through a sequence.
///
/// This is a closed union so that canonical keys can be computed by
/// matching rather than by inspecting types at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unit,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(Rc<str>),
    List(Rc<[Value]>),
    Record(Rc<Record>),
    Object(Instance),
}

/// A plain aggregate: named fields, compared structurally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<Rc<str>, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&Rc<str>, &Value)> {
        self.fields.iter()
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name.as_ref(), value);
        }
        record
    }
}

/// An object instance.
///
/// Unlike a [`Record`], an instance has identity: clones of an instance
/// are the same instance, while two instances created separately are
/// distinct even if their fields are equal. Strict equivalence honors
/// identity, coercive equivalence only looks at the fields.
#[derive(Debug, Clone)]
pub struct Instance(Rc<Record>);

impl Instance {
    pub fn new(record: Record) -> Self {
        Instance(Rc::new(record))
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn same_instance(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn shared(&self) -> &Rc<Record> {
        &self.0
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Value {
    pub fn list(values: impl IntoIterator<Item = impl Into<Value>>) -> Value {
        Value::List(values.into_iter().map(Into::into).collect())
    }

    pub fn record(record: Record) -> Value {
        Value::Record(Rc::new(record))
    }

    pub fn object(record: Record) -> Value {
        Value::Object(Instance::new(record))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Object(_) => "object",
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values.into())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::record(record)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Object(instance)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Unit, Into::into)
    }
}
