// Archivo: sort.rs
// Propósito: etapa de ordenación. Reordena de forma estable la colección
// filtrada según un único par (campo, dirección).
use crate::collation::compare_text;
use mes_domain::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Criterio de orden. Sin `key` la etapa conserva el orden filtrado.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(key: &str, direction: SortDirection) -> Self {
        Self { key: Some(key.to_string()),
               direction }
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }
}

/// Clave de orden de un valor: vacío < numérico < texto. Dentro de una
/// clase compara el valor; entre clases decide sólo el rango.
enum SortKey<'a> {
    Empty,
    Number(f64),
    Text(Cow<'a, str>),
}

impl<'a> SortKey<'a> {
    fn of(value: Option<&'a FieldValue>) -> Self {
        let Some(value) = value else {
            return SortKey::Empty;
        };
        if let Some(n) = value.as_number() {
            return SortKey::Number(n);
        }
        let text = value.as_text();
        if text.is_empty() {
            SortKey::Empty
        } else {
            SortKey::Text(text)
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Empty => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (SortKey::Text(x), SortKey::Text(y)) => compare_text(x, y),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compara dos valores de campo. Los valores numéricos (números o texto
/// que se interpreta como número) se comparan por valor; el resto de los
/// textos con orden natural. Un campo ausente o vacío va primero y los
/// números van antes que el texto.
pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    SortKey::of(a).compare(&SortKey::of(b))
}

/// Ordena las referencias de registros. Es estable: claves iguales
/// conservan su orden relativo. En orden descendente se intercambian los
/// operandos del comparador.
pub fn sort_records<'a>(mut records: Vec<&'a Record>, spec: &SortSpec) -> Vec<&'a Record> {
    let Some(key) = spec.key.as_deref() else {
        return records;
    };
    match spec.direction {
        SortDirection::Asc => records.sort_by(|a, b| compare_values(a.get(key), b.get(key))),
        SortDirection::Desc => records.sort_by(|a, b| compare_values(b.get(key), a.get(key))),
    }
    log::debug!("orden: {} registros por '{}' ({:?})", records.len(), key, spec.direction);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Record> {
        vec![Record::new().with("id", 1i64).with("machineName", "ABC-10").with("qty", 120i64),
             Record::new().with("id", 2i64).with("machineName", "ABC-2").with("qty", 95i64),
             Record::new().with("id", 3i64).with("qty", 120i64),
             Record::new().with("id", 4i64).with("machineName", "abc-2").with("qty", 9i64)]
    }

    fn ids(rs: &[&Record]) -> Vec<f64> {
        rs.iter().map(|r| r.number("id")).collect()
    }

    #[test]
    fn no_key_preserves_order() {
        let data = rows();
        let out = sort_records(data.iter().collect(), &SortSpec::none());
        assert_eq!(ids(&out), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn numeric_values_compare_by_value() {
        let data = rows();
        let out = sort_records(data.iter().collect(), &SortSpec::by("qty", SortDirection::Asc));
        assert_eq!(ids(&out), vec![4.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn descending_is_mirror_and_stable() {
        let data = rows();
        let out = sort_records(data.iter().collect(), &SortSpec::by("qty", SortDirection::Desc));
        // 1 y 3 empatan en 120 y mantienen su orden de entrada
        assert_eq!(ids(&out), vec![1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn text_uses_natural_order_and_missing_is_empty() {
        let data = rows();
        let out = sort_records(data.iter().collect(), &SortSpec::by("machineName", SortDirection::Asc));
        assert_eq!(ids(&out), vec![3.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn numeric_text_compares_by_value() {
        let a = FieldValue::Number(10.0);
        let b = FieldValue::Text("9".into());
        assert_eq!(compare_values(Some(&a), Some(&b)), Ordering::Greater);
        assert_eq!(compare_values(None, Some(&b)), Ordering::Less);
        assert_eq!(compare_values(Some(&FieldValue::Null), None), Ordering::Equal);
    }

    #[test]
    fn mixed_column_has_no_cycles() {
        let a = FieldValue::Number(1.25);
        let b = FieldValue::Number(1.5);
        let c = FieldValue::Text("1.7".into());
        let word = FieldValue::Text("ABC".into());
        assert_eq!(compare_values(Some(&a), Some(&b)), Ordering::Less);
        assert_eq!(compare_values(Some(&b), Some(&c)), Ordering::Less);
        assert_eq!(compare_values(Some(&a), Some(&c)), Ordering::Less);
        assert_eq!(compare_values(Some(&c), Some(&word)), Ordering::Less);
        assert_eq!(compare_values(Some(&word), Some(&a)), Ordering::Greater);
    }

    #[test]
    fn sorting_mixed_column_does_not_panic() {
        let data: Vec<Record> = (0..200i64).map(|i| {
                                               let r = Record::new().with("id", i);
                                               match i % 4 {
                                                   0 => r.with("v", (i as f64) / 8.0 - 5.0),
                                                   1 => r.with("v", format!("{}", (i * 7) % 13)),
                                                   2 => r.with("v", format!("x{}", i % 11)),
                                                   _ => r.with("v", format!("{:.2}", (i as f64) / 3.0)),
                                               }
                                           })
                                           .collect();
        for dir in [SortDirection::Asc, SortDirection::Desc] {
            let spec = SortSpec::by("v", dir);
            let once = sort_records(data.iter().collect(), &spec);
            assert_eq!(once.len(), data.len());
            for pair in once.windows(2) {
                let ord = compare_values(pair[0].get("v"), pair[1].get("v"));
                match dir {
                    SortDirection::Asc => assert_ne!(ord, Ordering::Greater),
                    SortDirection::Desc => assert_ne!(ord, Ordering::Less),
                }
            }
            assert_eq!(sort_records(once.clone(), &spec), once);
        }
    }

    #[test]
    fn direction_serializes_lowercase() {
        let spec = SortSpec::by("qty", SortDirection::Desc);
        let v = serde_json::to_value(&spec).unwrap();
        assert_eq!(v["direction"], "desc");
        assert_eq!(SortDirection::Desc.flipped(), SortDirection::Asc);
    }
}
