//! Best-effort affiliation enrichment against the dealership directory.
//!
//! Legacy profiles sometimes carry a dealership code but no usable id. This
//! step looks the code up and repairs the identity. It never fails: any
//! directory problem leaves the identity exactly as it was.

use dealerdesk_core::{
  Affiliation, Identity,
  directory::{DealershipDirectory, DealershipRecord, DirectoryQuery},
};

use crate::ident::is_uuid_like;

/// Page size for the code-filtered lookup.
pub const FILTERED_PAGE_SIZE: usize = 20;

/// Page size for the unfiltered fallback lookup.
pub const FALLBACK_PAGE_SIZE: usize = 100;

/// Repair `identity`'s affiliation from the directory when it has a code but
/// no valid affiliation id.
///
/// Makes at most two sequential directory calls: a search by code, then an
/// unfiltered page if the search came back empty.
pub async fn resolve_affiliation_details<D>(identity: Identity, directory: &D) -> Identity
where
  D: DealershipDirectory,
{
  let Some(code) = identity.affiliation_code.clone() else {
    return identity;
  };
  if identity.primary_affiliation_id.as_deref().is_some_and(is_uuid_like) {
    return identity;
  }

  let records = match lookup(directory, &code).await {
    Ok(records) => records,
    Err(e) => {
      tracing::warn!(code = %code, error = %e, "dealership lookup failed; keeping profile as-is");
      return identity;
    }
  };

  match best_match(&records, &code) {
    Some(record) => {
      tracing::debug!(code = %code, dealership_id = %record.id, "resolved dealership from directory");
      apply(identity, record)
    }
    None => {
      tracing::debug!(code = %code, results = records.len(), "no dealership matched");
      identity
    }
  }
}

async fn lookup<D>(directory: &D, code: &str) -> Result<Vec<DealershipRecord>, D::Error>
where
  D: DealershipDirectory,
{
  let filtered = DirectoryQuery {
    text:  Some(code.to_owned()),
    limit: FILTERED_PAGE_SIZE,
  };
  let records = directory.search(&filtered).await?;
  if !records.is_empty() {
    return Ok(records);
  }

  let unfiltered = DirectoryQuery {
    text:  None,
    limit: FALLBACK_PAGE_SIZE,
  };
  directory.search(&unfiltered).await
}

/// Pick the record `search` most plausibly refers to: exact code, exact
/// name, code containing the search text, then anything with a valid id.
/// Comparisons ignore case. Records with a blank id are never picked.
pub fn best_match<'a>(
  records: &'a [DealershipRecord],
  search: &str,
) -> Option<&'a DealershipRecord> {
  let needle = search.to_lowercase();
  let lower = |field: &Option<String>| field.as_deref().map(str::to_lowercase);
  let is_needle = |field: &Option<String>| lower(field).is_some_and(|v| v == needle);
  let usable = || records.iter().filter(|r| !r.id.trim().is_empty());

  usable()
    .find(|r| is_needle(&r.code))
    .or_else(|| usable().find(|r| is_needle(&r.name)))
    .or_else(|| usable().find(|r| lower(&r.code).is_some_and(|c| c.contains(&needle))))
    .or_else(|| usable().find(|r| is_uuid_like(&r.id)))
}

fn apply(mut identity: Identity, record: &DealershipRecord) -> Identity {
  identity.primary_affiliation_id = Some(record.id.clone());
  identity.primary_affiliation = Some(Affiliation {
    id:        Some(record.id.clone()),
    name:      record.name.clone(),
    code:      record.code.clone(),
    is_active: record.is_active,
  });
  if record.code.is_some() {
    identity.affiliation_code = record.code.clone();
  }
  identity
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(id: &str, code: Option<&str>, name: Option<&str>) -> DealershipRecord {
    DealershipRecord {
      id:        id.to_owned(),
      code:      code.map(str::to_owned),
      name:      name.map(str::to_owned),
      is_active: true,
    }
  }

  #[test]
  fn exact_code_beats_name_and_substring() {
    let records = [
      record("1", Some("NSM-2"), None),
      record("2", None, Some("nsm")),
      record("3", Some("nsm"), None),
    ];
    assert_eq!(best_match(&records, "NSM").unwrap().id, "3");
  }

  #[test]
  fn exact_name_beats_substring() {
    let records = [record("1", Some("XNSMX"), None), record("2", None, Some("Nsm"))];
    assert_eq!(best_match(&records, "nsm").unwrap().id, "2");
  }

  #[test]
  fn substring_of_code_beats_any_valid_id() {
    let records = [
      record("123e4567-e89b-12d3-a456-426614174000", Some("OTHER"), None),
      record("2", Some("west-nsm"), None),
    ];
    assert_eq!(best_match(&records, "NSM").unwrap().id, "2");
  }

  #[test]
  fn any_valid_id_is_the_last_resort() {
    let records = [
      record("7", Some("A"), None),
      record("123e4567-e89b-12d3-a456-426614174000", Some("B"), None),
    ];
    assert_eq!(
      best_match(&records, "NSM").unwrap().id,
      "123e4567-e89b-12d3-a456-426614174000"
    );
    assert!(best_match(&records[..1], "NSM").is_none());
  }

  #[test]
  fn blank_ids_are_never_picked() {
    let records = [record("", Some("NSM"), Some("Northside")), record(" ", Some("nsm"), None)];
    assert!(best_match(&records, "NSM").is_none());

    let records = [record("", Some("NSM"), None), record("17", Some("NSM-2"), None)];
    assert_eq!(best_match(&records, "NSM").unwrap().id, "17");
  }
}
