//! Persistence adapter: maps the board state onto its two storage slots.

use platform_store::KeyValueStore;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    employee::Employee,
    error::{TipsError, TipsResult},
};

/// JSON array of [`Employee`] records.
pub const ROSTER_SLOT: &str = "listaEmpleados";
/// JSON number, or `null`, holding the accumulated pool.
pub const POOL_SLOT: &str = "boteGuardado";

pub fn load_roster<S: KeyValueStore + ?Sized>(store: &S) -> TipsResult<Vec<Employee>> {
    let raw = store.get(ROSTER_SLOT)?;
    Ok(decode_or_default::<Vec<Employee>>(ROSTER_SLOT, raw))
}

pub fn load_pool<S: KeyValueStore + ?Sized>(store: &S) -> TipsResult<Option<f64>> {
    let raw = store.get(POOL_SLOT)?;
    let pool = decode_or_default::<Option<f64>>(POOL_SLOT, raw);
    Ok(pool.filter(|amount| amount.is_finite()))
}

pub fn save_roster<S: KeyValueStore + ?Sized>(store: &mut S, roster: &[Employee]) -> TipsResult<()> {
    write_slot(store, ROSTER_SLOT, &roster)
}

pub fn save_pool<S: KeyValueStore + ?Sized>(store: &mut S, pool: Option<f64>) -> TipsResult<()> {
    write_slot(store, POOL_SLOT, &pool)
}

/// Drops the pool slot entirely rather than writing `null`.
pub fn remove_pool<S: KeyValueStore + ?Sized>(store: &mut S) -> TipsResult<()> {
    store.remove(POOL_SLOT)?;
    Ok(())
}

fn write_slot<S, T>(store: &mut S, slot: &'static str, value: &T) -> TipsResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded =
        serde_json::to_string(value).map_err(|source| TipsError::Encode { slot, source })?;
    store.set(slot, &encoded)?;
    Ok(())
}

// Unreadable slots fall back to the empty state instead of blocking startup.
fn decode_or_default<T: DeserializeOwned + Default>(slot: &str, raw: Option<String>) -> T {
    let Some(raw) = raw.filter(|text| !text.trim().is_empty()) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(slot, error = %err, "discarding unreadable slot");
            T::default()
        }
    }
}
