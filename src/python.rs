//! Python bindings for catibcheck
//!
//! Thin wrappers that take CoNLL-X text and return plain Python values.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::catib_plus::{EnrichOptions, LexEncoding, RuleTable};
use crate::checks::QuadrupleTable;
use crate::config::Config;
use crate::conllx::to_conllx_string;
use crate::error::TreeError;
use crate::issue::IssueRecord;
use crate::report::CheckContext;
use crate::treebank::Treebank;

impl From<TreeError> for PyErr {
    fn from(err: TreeError) -> PyErr {
        match err {
            TreeError::Io(e) => PyIOError::new_err(e.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

fn load_config(config_json: Option<&str>) -> PyResult<Config> {
    match config_json {
        Some(json) => Ok(Config::from_json_str(json)?),
        None => Ok(Config::default()),
    }
}

fn record_to_dict<'py>(py: Python<'py>, record: &IssueRecord) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("flagged_issue", record.flagged_issue.as_str())?;
    dict.set_item("sentence_number", record.sentence_number)?;
    dict.set_item("token_id", record.token_id)?;
    dict.set_item("form", record.form.as_deref())?;
    dict.set_item("pos_tag", record.pos_tag.as_deref())?;
    dict.set_item("label", record.label.as_deref())?;
    dict.set_item("parent_id", record.parent_id)?;
    dict.set_item("parent_form", record.parent_form.as_deref())?;
    dict.set_item("parent_pos_tag", record.parent_pos_tag.as_deref())?;
    dict.set_item("direction", record.direction.map(|d| d.as_str()))?;
    dict.set_item("text", record.text.as_str())?;
    Ok(dict)
}

/// Check CoNLL-X text and return one dict per flagged issue.
///
/// Args:
///     text: CoNLL-X sentences separated by blank lines
///     config_json: Optional JSON overriding the default configuration
///     patterns_tsv: Optional TSV of attested syntactic patterns; the pattern
///                   check is skipped without it
///
/// Raises:
///     ValueError: If the configuration or pattern table is invalid
#[pyfunction]
#[pyo3(signature = (text, config_json=None, patterns_tsv=None))]
fn check_conllx<'py>(
    py: Python<'py>,
    text: &str,
    config_json: Option<&str>,
    patterns_tsv: Option<&str>,
) -> PyResult<Vec<Bound<'py, PyDict>>> {
    let config = load_config(config_json)?;
    let patterns = patterns_tsv.map(QuadrupleTable::from_tsv_str).transpose()?;
    let mut ctx = CheckContext::new(&config)?;
    if let Some(table) = &patterns {
        ctx = ctx.with_quadruples(table);
    }

    let report = Treebank::from_string(text).check_parallel(&ctx)?;
    report
        .records()
        .iter()
        .map(|record| record_to_dict(py, record))
        .collect()
}

/// Reattach commas and fix clitic tags, returning CoNLL-X text.
/// Sentences with malformed ids or heads are dropped.
#[pyfunction]
#[pyo3(signature = (text, config_json=None))]
fn repair_conllx(text: &str, config_json: Option<&str>) -> PyResult<String> {
    let config = load_config(config_json)?;
    let sentences = Treebank::from_string(text).repair(&config)?;
    Ok(to_conllx_string(&sentences)?)
}

/// Relabel POS and relations from a CATiB+ rule table, returning CoNLL-X text.
///
/// Args:
///     text: CoNLL-X sentences
///     rules_tsv: Rule table as TSV
///     return_all_ties: Join tied values with `|` instead of picking one
///     buckwalter: Match lemmas in Buckwalter transliteration
#[pyfunction]
#[pyo3(signature = (text, rules_tsv, return_all_ties=true, buckwalter=true))]
fn enrich_conllx(
    text: &str,
    rules_tsv: &str,
    return_all_ties: bool,
    buckwalter: bool,
) -> PyResult<String> {
    let table = RuleTable::from_tsv_str(rules_tsv)?;
    let options = EnrichOptions {
        encoding: if buckwalter {
            LexEncoding::Buckwalter
        } else {
            LexEncoding::Arabic
        },
        return_all_ties,
    };
    let sentences = Treebank::from_string(text).enrich(&table, options)?;
    Ok(to_conllx_string(&sentences)?)
}

#[pyfunction]
fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn catibcheck(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(check_conllx, m)?)?;
    m.add_function(wrap_pyfunction!(repair_conllx, m)?)?;
    m.add_function(wrap_pyfunction!(enrich_conllx, m)?)?;
    m.add_function(wrap_pyfunction!(__version__, m)?)?;
    Ok(())
}
