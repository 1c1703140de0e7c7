//! Strukturelle Patches: Feld-Diff zweier Zustände und Rückspielen.
//!
//! Ein Zustandsübergang wird als Snapshot vorher, Mutation auf einer Kopie
//! und Diff nachher abgebildet. Der Diff arbeitet auf dem serde-Datenmodell
//! (`serde_json::Value`) und liefert Vorwärts- und Rückwärts-Patches.

use anyhow::{anyhow, bail, Context};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Art einer Patch-Operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
}

/// Ein Pfadelement: Objekt-Schlüssel oder Array-Index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Eine einzelne strukturelle Änderung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub op: PatchOp,
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Patch {
    pub fn add(path: Vec<PathSegment>, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path,
            value: Some(value),
        }
    }

    pub fn remove(path: Vec<PathSegment>) -> Self {
        Self {
            op: PatchOp::Remove,
            path,
            value: None,
        }
    }

    pub fn replace(path: Vec<PathSegment>, value: Value) -> Self {
        Self {
            op: PatchOp::Replace,
            path,
            value: Some(value),
        }
    }

    /// Erster Schlüssel des Pfads (Top-Level-Feld), falls vorhanden.
    pub fn root_key(&self) -> Option<&str> {
        match self.path.first() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }
}

// ── Diff ────────────────────────────────────────────────────────────

/// Vergleicht zwei Werte und liefert `(vorwärts, rückwärts)`.
///
/// Vorwärts überführt `old` in `new`, rückwärts `new` in `old`. Gleiche
/// Werte ergeben zwei leere Listen.
pub fn diff(old: &Value, new: &Value) -> (Vec<Patch>, Vec<Patch>) {
    let mut forward = Vec::new();
    let mut inverse = Vec::new();
    let mut path = Vec::new();
    diff_into(old, new, &mut path, &mut forward, &mut inverse);
    (forward, inverse)
}

fn diff_into(
    old: &Value,
    new: &Value,
    path: &mut Vec<PathSegment>,
    forward: &mut Vec<Patch>,
    inverse: &mut Vec<Patch>,
) {
    if old == new {
        return;
    }
    match (old, new) {
        (Value::Object(a), Value::Object(b)) => diff_objects(a, b, path, forward, inverse),
        (Value::Array(a), Value::Array(b)) => diff_arrays(a, b, path, forward, inverse),
        _ => {
            forward.push(Patch::replace(path.clone(), new.clone()));
            inverse.push(Patch::replace(path.clone(), old.clone()));
        }
    }
}

fn diff_objects(
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    path: &mut Vec<PathSegment>,
    forward: &mut Vec<Patch>,
    inverse: &mut Vec<Patch>,
) {
    for (key, old_value) in old {
        path.push(PathSegment::Key(key.clone()));
        match new.get(key) {
            Some(new_value) => diff_into(old_value, new_value, path, forward, inverse),
            None => {
                forward.push(Patch::remove(path.clone()));
                inverse.push(Patch::add(path.clone(), old_value.clone()));
            }
        }
        path.pop();
    }
    for (key, new_value) in new {
        if old.contains_key(key) {
            continue;
        }
        path.push(PathSegment::Key(key.clone()));
        forward.push(Patch::add(path.clone(), new_value.clone()));
        inverse.push(Patch::remove(path.clone()));
        path.pop();
    }
}

/// Gemeinsamer Präfix wird indexweise verglichen, danach wird das Ende
/// angehängt bzw. von hinten entfernt.
fn diff_arrays(
    old: &[Value],
    new: &[Value],
    path: &mut Vec<PathSegment>,
    forward: &mut Vec<Patch>,
    inverse: &mut Vec<Patch>,
) {
    let common = old.len().min(new.len());
    for i in 0..common {
        path.push(PathSegment::Index(i));
        diff_into(&old[i], &new[i], path, forward, inverse);
        path.pop();
    }

    let at = |i: usize| {
        let mut p = path.clone();
        p.push(PathSegment::Index(i));
        p
    };

    if new.len() > old.len() {
        for (i, value) in new.iter().enumerate().skip(common) {
            forward.push(Patch::add(at(i), value.clone()));
        }
        for i in (common..new.len()).rev() {
            inverse.push(Patch::remove(at(i)));
        }
    } else if old.len() > new.len() {
        for i in (common..old.len()).rev() {
            forward.push(Patch::remove(at(i)));
        }
        for (i, value) in old.iter().enumerate().skip(common) {
            inverse.push(Patch::add(at(i), value.clone()));
        }
    }
}

// ── Anwenden ────────────────────────────────────────────────────────

/// Wendet Patches der Reihe nach auf `target` an.
pub fn apply_patches(target: &mut Value, patches: &[Patch]) -> anyhow::Result<()> {
    for (i, patch) in patches.iter().enumerate() {
        apply_patch(target, patch).with_context(|| {
            format!("Patch {} ({:?} {}) nicht anwendbar", i, patch.op, pointer(&patch.path))
        })?;
    }
    Ok(())
}

fn apply_patch(target: &mut Value, patch: &Patch) -> anyhow::Result<()> {
    let value = || {
        patch
            .value
            .clone()
            .ok_or_else(|| anyhow!("Patch ohne Wert"))
    };

    let Some((last, parents)) = patch.path.split_last() else {
        return match patch.op {
            PatchOp::Add | PatchOp::Replace => {
                *target = value()?;
                Ok(())
            }
            PatchOp::Remove => bail!("Wurzel kann nicht entfernt werden"),
        };
    };

    let mut parent = target;
    for segment in parents {
        parent = match (parent, segment) {
            (Value::Object(map), PathSegment::Key(key)) => map
                .get_mut(key)
                .ok_or_else(|| anyhow!("Schlüssel fehlt: {}", key))?,
            (Value::Array(items), PathSegment::Index(index)) => {
                let len = items.len();
                items
                    .get_mut(*index)
                    .ok_or_else(|| anyhow!("Index {} außerhalb (Länge {})", index, len))?
            }
            (_, segment) => bail!("Pfadelement {:?} passt nicht zum Wert", segment),
        };
    }

    match (parent, last) {
        (Value::Object(map), PathSegment::Key(key)) => match patch.op {
            PatchOp::Add | PatchOp::Replace => {
                map.insert(key.clone(), value()?);
            }
            PatchOp::Remove => {
                map.remove(key)
                    .ok_or_else(|| anyhow!("Schlüssel fehlt: {}", key))?;
            }
        },
        (Value::Array(items), PathSegment::Index(index)) => {
            let index = *index;
            match patch.op {
                PatchOp::Add if index <= items.len() => items.insert(index, value()?),
                PatchOp::Replace if index < items.len() => items[index] = value()?,
                PatchOp::Remove if index < items.len() => {
                    items.remove(index);
                }
                _ => bail!("Index {} außerhalb (Länge {})", index, items.len()),
            }
        }
        (_, segment) => bail!("Pfadelement {:?} passt nicht zum Wert", segment),
    }
    Ok(())
}

// ── Typisierte Übergänge ────────────────────────────────────────────

/// Führt `recipe` auf einer Kopie von `base` aus und liefert
/// `(neu, vorwärts, rückwärts)`.
pub fn produce_with_patches<T, F>(base: &T, recipe: F) -> anyhow::Result<(T, Vec<Patch>, Vec<Patch>)>
where
    T: Serialize + Clone,
    F: FnOnce(&mut T),
{
    let before = serde_json::to_value(base).context("Zustand nicht serialisierbar")?;
    let mut draft = base.clone();
    recipe(&mut draft);
    let after = serde_json::to_value(&draft).context("Zustand nicht serialisierbar")?;
    let (forward, inverse) = diff(&before, &after);
    Ok((draft, forward, inverse))
}

/// Wendet Patches auf einen typisierten Zustand an und liefert den neuen Zustand.
pub fn apply_to<T>(base: &T, patches: &[Patch]) -> anyhow::Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(base).context("Zustand nicht serialisierbar")?;
    apply_patches(&mut value, patches)?;
    serde_json::from_value(value).context("Gepatchter Zustand ungültig")
}

// ── JSON Patch (RFC 6902) ───────────────────────────────────────────

/// JSON-Pointer (RFC 6901) eines Pfads.
pub fn pointer(path: &[PathSegment]) -> String {
    path.iter()
        .map(|segment| match segment {
            PathSegment::Key(key) => format!("/{}", key.replace('~', "~0").replace('/', "~1")),
            PathSegment::Index(index) => format!("/{}", index),
        })
        .collect()
}

/// Patches als JSON-Patch-Dokument (`[{op, path, value?}, ...]`).
pub fn to_json_patch(patches: &[Patch]) -> Value {
    Value::Array(
        patches
            .iter()
            .map(|patch| {
                let mut entry = Map::new();
                let op = match patch.op {
                    PatchOp::Add => "add",
                    PatchOp::Remove => "remove",
                    PatchOp::Replace => "replace",
                };
                entry.insert("op".into(), Value::from(op));
                entry.insert("path".into(), Value::from(pointer(&patch.path)));
                if let Some(value) = &patch.value {
                    entry.insert("value".into(), value.clone());
                }
                Value::Object(entry)
            })
            .collect(),
    )
}
