//! Signed order files.
//!
//! Orders are written with their big-number fields as decimal strings so the
//! files can be consumed without a 256-bit integer library.

use std::fs;
use std::path::Path;

use alloy_primitives::U256;
use anyhow::{Context, Result};
use looksrare_core::signing::{MerkleTree, SignMerkleTreeOutput};
use looksrare_core::types::Maker;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// File name of the batch output.
pub const TREE_FILE: &str = "tree.json";

/// File name of the single order output.
pub const SINGLE_FILE: &str = "single.json";

const NUMERIC_FIELDS: [&str; 4] = ["price", "subsetNonce", "orderNonce", "globalNonce"];
const NUMERIC_LIST_FIELDS: [&str; 2] = ["itemIds", "amounts"];

/// Batch file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedBundle {
    pub signature: String,
    pub merkle_tree_proofs: Vec<MerkleTree>,
    /// Orders with numeric fields stringified, in leaf order.
    pub maker_orders: Vec<Value>,
}

impl SignedBundle {
    pub fn from_output(output: SignMerkleTreeOutput) -> Result<Self> {
        let maker_orders = output
            .maker_orders
            .iter()
            .map(convert_maker_string)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            signature: output.signature,
            merkle_tree_proofs: output.merkle_tree_proofs,
            maker_orders,
        })
    }
}

/// Single order file contents: the stringified maker plus its signature.
pub fn single_order_record(maker: &Maker, signature: &str) -> Result<Value> {
    let mut record = convert_maker_string(maker)?;
    if let Some(fields) = record.as_object_mut() {
        fields.insert("signature".to_string(), Value::String(signature.to_string()));
    }
    Ok(record)
}

/// JSON form of `maker` with price, nonces, item ids and amounts as decimal
/// strings.
pub fn convert_maker_string(maker: &Maker) -> Result<Value> {
    let mut value = serde_json::to_value(maker).context("Failed to serialize maker order")?;
    stringify_numeric_fields(&mut value);
    Ok(value)
}

/// Rewrite the numeric fields of an order object in place.
///
/// Values that are already decimal strings are left as they are, as is any
/// field outside the numeric set.
pub fn stringify_numeric_fields(order: &mut Value) {
    let Some(fields) = order.as_object_mut() else {
        return;
    };

    for key in NUMERIC_FIELDS {
        if let Some(value) = fields.get_mut(key) {
            to_decimal_string(value);
        }
    }

    for key in NUMERIC_LIST_FIELDS {
        if let Some(Value::Array(items)) = fields.get_mut(key) {
            items.iter_mut().for_each(to_decimal_string);
        }
    }
}

fn to_decimal_string(value: &mut Value) {
    let decimal = match value {
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        Value::String(s) if s.starts_with("0x") || s.starts_with("0X") => {
            s.to_lowercase().parse::<U256>().ok().map(|n| n.to_string())
        }
        _ => None,
    };

    if let Some(decimal) = decimal {
        *value = Value::String(decimal);
    }
}

/// Write `value` as pretty JSON to `path`, replacing any existing file.
///
/// The data goes to a uniquely named sibling first and is renamed into
/// place, so readers never observe a partial file.
pub fn write_json<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    let tmp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

    fs::write(&tmp_path, json)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to move output into {}", path.display()));
    }

    debug!(path = %path.display(), "Wrote output file");
    Ok(())
}
