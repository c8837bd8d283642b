//! JSON wire format for catalogs.
//!
//! ```text
//! { "<model>": { "<powertrain>": {
//!     "<trim>": { "가격": 4500, "옵션": { "<option>": { "value": true | false | 100,
//!                                                   "requires": ["..."],
//!                                                   "conditional": [{ "requires": ["..."], "value": 30 }] } } },
//!     "색상": { "<color>": { "value": 20 } } } } }
//! ```
//!
//! Parsing is all-or-nothing: the first structural problem aborts with
//! `MalformedCatalog` and nothing is built.

use serde_json::{Map, Value};

use carconfig_core::{ConfiguratorError, ConfiguratorResult};

use crate::catalog::{
    Catalog, Color, ColorSet, ConditionalPrice, InclusionMode, Model, OptionSet, Powertrain, Trim,
    TrimOption,
};

/// Trim base price key.
pub const PRICE_KEY: &str = "가격";
/// Trim option set key.
pub const OPTIONS_KEY: &str = "옵션";
/// Reserved powertrain key holding the color set.
pub const COLORS_KEY: &str = "색상";

const VALUE_KEY: &str = "value";
const REQUIRES_KEY: &str = "requires";
const CONDITIONAL_KEY: &str = "conditional";

impl Catalog {
    /// Parse a catalog document.
    pub fn from_json_str(text: &str) -> ConfiguratorResult<Catalog> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ConfiguratorError::malformed("$", format!("invalid JSON: {e}")))?;
        let catalog = Self::from_value(&value)?;
        tracing::debug!(models = catalog.models().len(), "parsed catalog");
        Ok(catalog)
    }

    pub fn from_value(value: &Value) -> ConfiguratorResult<Catalog> {
        let root = "$".to_string();
        let models = as_object(value, &root)?
            .iter()
            .map(|(name, v)| parse_model(name, v, &child(&root, name)))
            .collect::<ConfiguratorResult<Vec<_>>>()?;
        Ok(Catalog::new(models))
    }

    /// Render back to the wire format, preserving order.
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        for model in self.models() {
            let mut powertrains = Map::new();
            for powertrain in &model.powertrains {
                powertrains.insert(powertrain.name.clone(), powertrain_to_value(powertrain));
            }
            root.insert(model.name.clone(), Value::Object(powertrains));
        }
        Value::Object(root)
    }

    pub fn to_json_pretty(&self) -> String {
        // Serializing a `Value` cannot fail.
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }
}

fn child(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}

fn as_object<'a>(value: &'a Value, path: &str) -> ConfiguratorResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ConfiguratorError::malformed(path, format!("expected object, found {}", kind(value))))
}

fn as_integer(value: &Value, path: &str) -> ConfiguratorResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| ConfiguratorError::malformed(path, format!("expected integer, found {}", kind(value))))
}

fn required<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> ConfiguratorResult<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| ConfiguratorError::malformed(path, format!("missing required key '{key}'")))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(n) if n.is_u64() => "integer out of range",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_names(value: &Value, path: &str) -> ConfiguratorResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| ConfiguratorError::malformed(path, format!("expected array, found {}", kind(value))))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ConfiguratorError::malformed(
                    format!("{path}[{i}]"),
                    format!("expected string, found {}", kind(item)),
                )
            })
        })
        .collect()
}

fn parse_model(name: &str, value: &Value, path: &str) -> ConfiguratorResult<Model> {
    let powertrains = as_object(value, path)?
        .iter()
        .map(|(pt_name, v)| parse_powertrain(pt_name, v, &child(path, pt_name)))
        .collect::<ConfiguratorResult<Vec<_>>>()?;
    Ok(Model::new(name, powertrains))
}

fn parse_powertrain(name: &str, value: &Value, path: &str) -> ConfiguratorResult<Powertrain> {
    let object = as_object(value, path)?;
    let mut trims = Vec::new();
    let mut colors = None;

    for (key, v) in object {
        let key_path = child(path, key);
        if key == COLORS_KEY {
            colors = Some(parse_colors(v, &key_path)?);
        } else {
            trims.push(parse_trim(key, v, &key_path)?);
        }
    }

    Ok(Powertrain::new(name, trims, colors))
}

fn parse_trim(name: &str, value: &Value, path: &str) -> ConfiguratorResult<Trim> {
    let object = as_object(value, path)?;
    let base_price = as_integer(required(object, PRICE_KEY, path)?, &child(path, PRICE_KEY))?;

    let options_path = child(path, OPTIONS_KEY);
    let options = as_object(required(object, OPTIONS_KEY, path)?, &options_path)?
        .iter()
        .map(|(opt_name, v)| parse_option(opt_name, v, &child(&options_path, opt_name)))
        .collect::<ConfiguratorResult<Vec<_>>>()?;

    Ok(Trim::new(name, base_price, OptionSet::new(options)))
}

fn parse_option(name: &str, value: &Value, path: &str) -> ConfiguratorResult<TrimOption> {
    let object = as_object(value, path)?;

    let value_path = child(path, VALUE_KEY);
    let inclusion = match required(object, VALUE_KEY, path)? {
        Value::Bool(true) => InclusionMode::AlwaysIncluded,
        Value::Bool(false) => InclusionMode::AlwaysExcluded,
        other => InclusionMode::Priced(as_integer(other, &value_path).map_err(|_| {
            ConfiguratorError::malformed(
                &value_path,
                format!("expected boolean or integer, found {}", kind(other)),
            )
        })?),
    };

    let requires = match object.get(REQUIRES_KEY) {
        Some(v) => parse_names(v, &child(path, REQUIRES_KEY))?,
        None => Vec::new(),
    };

    let conditional_pricing = match object.get(CONDITIONAL_KEY) {
        Some(v) => parse_conditionals(v, &child(path, CONDITIONAL_KEY))?,
        None => Vec::new(),
    };

    Ok(TrimOption {
        name: name.to_string(),
        inclusion,
        requires,
        conditional_pricing,
    })
}

fn parse_conditionals(value: &Value, path: &str) -> ConfiguratorResult<Vec<ConditionalPrice>> {
    let entries = value
        .as_array()
        .ok_or_else(|| ConfiguratorError::malformed(path, format!("expected array, found {}", kind(value))))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry_path = format!("{path}[{i}]");
            let object = as_object(entry, &entry_path)?;
            let requires = parse_names(
                required(object, REQUIRES_KEY, &entry_path)?,
                &child(&entry_path, REQUIRES_KEY),
            )?;
            let amount = as_integer(
                required(object, VALUE_KEY, &entry_path)?,
                &child(&entry_path, VALUE_KEY),
            )?;
            Ok(ConditionalPrice { requires, amount })
        })
        .collect()
}

fn parse_colors(value: &Value, path: &str) -> ConfiguratorResult<ColorSet> {
    let colors = as_object(value, path)?
        .iter()
        .map(|(name, v)| {
            let color_path = child(path, name);
            let object = as_object(v, &color_path)?;
            let amount = as_integer(
                required(object, VALUE_KEY, &color_path)?,
                &child(&color_path, VALUE_KEY),
            )?;
            Ok(Color::new(name.as_str(), amount))
        })
        .collect::<ConfiguratorResult<Vec<_>>>()?;
    Ok(ColorSet::new(colors))
}

fn powertrain_to_value(powertrain: &Powertrain) -> Value {
    let mut object = Map::new();
    for trim in &powertrain.trims {
        let mut options = Map::new();
        for option in trim.options.iter() {
            options.insert(option.name.clone(), option_to_value(option));
        }
        let mut trim_object = Map::new();
        trim_object.insert(PRICE_KEY.to_string(), Value::from(trim.base_price));
        trim_object.insert(OPTIONS_KEY.to_string(), Value::Object(options));
        object.insert(trim.name.clone(), Value::Object(trim_object));
    }

    if let Some(colors) = &powertrain.colors {
        let mut color_object = Map::new();
        for color in colors.iter() {
            let mut entry = Map::new();
            entry.insert(VALUE_KEY.to_string(), Value::from(color.amount));
            color_object.insert(color.name.clone(), Value::Object(entry));
        }
        object.insert(COLORS_KEY.to_string(), Value::Object(color_object));
    }

    Value::Object(object)
}

fn option_to_value(option: &TrimOption) -> Value {
    let mut object = Map::new();
    let value = match option.inclusion {
        InclusionMode::AlwaysIncluded => Value::Bool(true),
        InclusionMode::AlwaysExcluded => Value::Bool(false),
        InclusionMode::Priced(amount) => Value::from(amount),
    };
    object.insert(VALUE_KEY.to_string(), value);

    if !option.requires.is_empty() {
        object.insert(REQUIRES_KEY.to_string(), Value::from(option.requires.clone()));
    }

    if !option.conditional_pricing.is_empty() {
        let entries = option
            .conditional_pricing
            .iter()
            .map(|c| {
                let mut entry = Map::new();
                entry.insert(REQUIRES_KEY.to_string(), Value::from(c.requires.clone()));
                entry.insert(VALUE_KEY.to_string(), Value::from(c.amount));
                Value::Object(entry)
            })
            .collect();
        object.insert(CONDITIONAL_KEY.to_string(), Value::Array(entries));
    }

    Value::Object(object)
}
