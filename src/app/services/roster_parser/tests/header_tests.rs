//! Tests for header row sniffing

use super::{grid, row};
use crate::app::models::ColumnMap;
use crate::app::services::roster_parser::header::{
    detect_columns, normalize_header_cell, sniff_header,
};
use crate::config::HeaderPolicy;

#[test]
fn test_normalize_header_cell() {
    assert_eq!(normalize_header_cell("  Prénom "), "prenom");
    assert_eq!(normalize_header_cell("NÔM"), "nom");
    assert_eq!(normalize_header_cell("Élève"), "eleve");
    assert_eq!(normalize_header_cell(""), "");
}

#[test]
fn test_detect_columns_standard_header() {
    let columns = detect_columns(&row(&["Nom", "Prénom", "Classe"]));

    assert_eq!(
        columns,
        ColumnMap {
            surname: Some(0),
            given_name: Some(1),
            class: Some(2),
        }
    );
}

#[test]
fn test_surname_matches_regardless_of_case_and_accents() {
    for label in ["NOM", "nom", "Nôm ", " Noms", "NOMS"] {
        let columns = detect_columns(&row(&["Classe", label]));
        assert_eq!(columns.surname, Some(1), "label {:?}", label);
    }
}

#[test]
fn test_surname_requires_exact_match() {
    // "Nom de famille" contains "nom" but is not an exact match
    let columns = detect_columns(&row(&["Nom de famille", "Prénom usuel"]));
    assert_eq!(columns.surname, None);
    assert_eq!(columns.given_name, Some(1));
}

#[test]
fn test_class_column_synonyms() {
    assert_eq!(detect_columns(&row(&["Nom", "Groupe TD"])).class, Some(1));
    assert_eq!(detect_columns(&row(&["Section", "Nom"])).class, Some(0));
    assert_eq!(detect_columns(&row(&["Nom", "Prénom", "Sous-classe"])).class, Some(2));
}

#[test]
fn test_first_match_wins() {
    let columns = detect_columns(&row(&["Prénom 1", "Nom", "Prénom 2", "Nom", "Classe", "Groupe"]));

    assert_eq!(columns.given_name, Some(0));
    assert_eq!(columns.surname, Some(1));
    assert_eq!(columns.class, Some(4));
}

#[test]
fn test_sniff_header_detects_name_header() {
    let detection = sniff_header(&grid(&[&["Nom", "Prénom"], &["MOREAU", "Camille"]]), HeaderPolicy::NameColumns);

    assert!(detection.has_header());
    assert_eq!(detection.start_row, 1);
    assert_eq!(detection.columns.surname, Some(0));
    assert_eq!(detection.columns.given_name, Some(1));
}

#[test]
fn test_sniff_header_without_header() {
    let detection = sniff_header(&grid(&[&["Camille", "Moreau"]]), HeaderPolicy::NameColumns);

    assert!(!detection.has_header());
    assert_eq!(detection.start_row, 0);
    assert_eq!(detection.columns, ColumnMap::default());
}

#[test]
fn test_class_only_header_depends_on_policy() {
    let roster = grid(&[&["Élève", "Groupe"], &["DUPONT Jean", "BTS1"]]);

    let student_manager = sniff_header(&roster, HeaderPolicy::NameColumns);
    assert_eq!(student_manager.start_row, 0);
    // The class column is kept even though row 0 is read as data
    assert_eq!(student_manager.columns.class, Some(1));

    let class_manager = sniff_header(&roster, HeaderPolicy::AnyColumn);
    assert_eq!(class_manager.start_row, 1);
    assert_eq!(class_manager.columns.class, Some(1));
}

#[test]
fn test_sniff_empty_grid() {
    let detection = sniff_header(&grid(&[]), HeaderPolicy::AnyColumn);
    assert_eq!(detection.start_row, 0);
    assert_eq!(detection.columns, ColumnMap::default());
}
