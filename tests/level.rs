//! Tests for the severity scale.

use modlog::Level;

#[test]
fn level_ordering() {
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Notice);
    assert!(Level::Notice < Level::Warning);
    assert!(Level::Warning < Level::Error);
    assert!(Level::Error < Level::Critical);
}

#[test]
fn level_display() {
    assert_eq!(Level::Debug.to_string(), "DEBUG");
    assert_eq!(Level::Info.to_string(), "INFO");
    assert_eq!(Level::Notice.to_string(), "NOTICE");
    assert_eq!(Level::Warning.to_string(), "WARNING");
    assert_eq!(Level::Error.to_string(), "ERROR");
    assert_eq!(Level::Critical.to_string(), "CRITICAL");
}

#[test]
fn level_from_str_is_case_insensitive() {
    assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("NOTICE".parse::<Level>().unwrap(), Level::Notice);
    assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
    assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("crit".parse::<Level>().unwrap(), Level::Critical);
}

#[test]
fn canonical_text_round_trips() {
    for level in Level::all() {
        let text = level.to_string();
        assert_eq!(text.parse::<Level>().unwrap(), level);
        assert_eq!(text.to_lowercase().parse::<Level>().unwrap().to_string(), text);
    }
}

#[test]
fn level_from_str_invalid() {
    assert!("invalid".parse::<Level>().is_err());
    assert!("trace".parse::<Level>().is_err());
}

#[test]
fn level_default() {
    assert_eq!(Level::default(), Level::Info);
    assert_eq!(Level::DEFAULT, Level::Info);
}

#[test]
fn all_is_sorted() {
    let all = Level::all();
    assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
}
