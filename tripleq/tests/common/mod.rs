use log::LevelFilter;
use simplelog::{Config, TestLogger};
use tripleq::{
    Scope, Type, Value,
    normalization::{after_being, lower_cased},
};

pub fn setup() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// A scope where strings compare case insensitively.
#[allow(dead_code)]
pub fn case_insensitive() -> Scope {
    Scope::new()
        .nested()
        .equality(Type::string(), after_being(lower_cased()))
        .build()
}

#[allow(dead_code)]
pub fn strs<const N: usize>(xs: [&str; N]) -> [Value; N] {
    xs.map(Value::str)
}
