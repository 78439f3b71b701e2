use std::io::BufReader;

use bytes::Bytes;

use super::*;
use crate::bencode::{decode, encode, BencodeError, Value, ValueKind};
use crate::bencode_record;

#[derive(Debug, Default, Clone, PartialEq)]
struct User {
    name: String,
    age: i64,
}

bencode_record!(User { name: "name", age: "age" });

#[derive(Debug, Default, PartialEq)]
struct Role {
    id: i64,
    user: User,
}

bencode_record!(Role { id, user });

#[derive(Debug, Default, PartialEq)]
struct Profile {
    id: i64,
    user: User,
    score: Vec<i64>,
}

bencode_record!(Profile { id, ..user, score: "score" });

#[derive(Debug, Default, PartialEq)]
struct Team {
    name: String,
    size: u8,
    member: Vec<User>,
}

bencode_record!(Team { name, size, member });

#[derive(Debug, Default, PartialEq)]
struct Torrent {
    announce: Option<String>,
    piece_length: u32,
    pieces: Bytes,
    extra: Value,
}

bencode_record!(Torrent {
    announce,
    piece_length: "piece length",
    pieces,
    extra: "x-extra",
});

#[allow(non_snake_case)]
#[derive(Debug, Default, PartialEq)]
struct Shouty {
    Name: String,
}

bencode_record!(Shouty { Name });

fn archer() -> User {
    User {
        name: "archer".into(),
        age: 29,
    }
}

#[test]
fn test_marshal_primitives() {
    let mut out = Vec::new();
    assert_eq!(marshal_to(&mut out, "abc").unwrap(), 5);
    assert_eq!(out, b"3:abc");

    out.clear();
    assert_eq!(marshal_to(&mut out, &199).unwrap(), 5);
    assert_eq!(out, b"i199e");

    assert_eq!(marshal(&-7i32).unwrap(), Value::Integer(-7));
}

#[test]
fn test_marshal_sequence() {
    let value = marshal(&vec![85, 90, 95]).unwrap();
    assert_eq!(encode(&value).unwrap(), b"li85ei90ei95ee");
}

#[test]
fn test_unmarshal_list() {
    let document = decode(b"li85ei90ei95ee").unwrap();
    let mut scores: Vec<i64> = vec![1];
    unmarshal(&document, &mut scores).unwrap();
    assert_eq!(scores, vec![85, 90, 95]);
}

#[test]
fn test_unmarshal_user() {
    let data = b"d4:name6:archer3:agei29ee";
    let mut user = User::default();
    unmarshal(&decode(data).unwrap(), &mut user).unwrap();
    assert_eq!(user, archer());

    let mut out = Vec::new();
    assert_eq!(marshal_to(&mut out, &user).unwrap(), 25);
    assert_eq!(out, data);
}

#[test]
fn test_unmarshal_from_reader() {
    let mut user = User::default();
    unmarshal_from_reader(BufReader::new(&b"d4:name6:archer3:agei29ee"[..]), &mut user).unwrap();
    assert_eq!(user, archer());

    assert!(matches!(
        unmarshal_from_reader(&b"d4:name6:arc"[..], &mut user),
        Err(RecordError::Bencode(BencodeError::UnexpectedEof))
    ));
}

#[test]
fn test_nested_record() {
    let data = b"d2:idi1e4:userd4:name6:archer3:agei29eee";
    let mut role = Role::default();
    unmarshal(&decode(data).unwrap(), &mut role).unwrap();
    assert_eq!(role.id, 1);
    assert_eq!(role.user, archer());

    let mut out = Vec::new();
    assert_eq!(marshal_to(&mut out, &role).unwrap(), data.len());
    assert_eq!(out, data);
}

#[test]
fn test_embedded_record_is_flattened() {
    let data = b"d2:idi3e4:name6:archer3:agei29e5:scoreli80ei85ei90eee";
    let mut profile = Profile::default();
    unmarshal(&decode(data).unwrap(), &mut profile).unwrap();
    assert_eq!(profile.id, 3);
    assert_eq!(profile.user, archer());
    assert_eq!(profile.score, vec![80, 85, 90]);

    let value = marshal(&profile).unwrap();
    assert!(value.get(b"user").is_none());
    assert_eq!(encode(&value).unwrap(), data);
}

#[test]
fn test_list_of_records() {
    let data = b"d4:name3:ace4:sizei2e6:memberld4:name6:archer3:agei29eed4:name5:nancy3:agei31eeee";
    let mut team = Team::default();
    unmarshal(&decode(data).unwrap(), &mut team).unwrap();
    assert_eq!(team.name, "ace");
    assert_eq!(team.size, 2);
    assert_eq!(team.member.len(), 2);
    assert_eq!(team.member[1].name, "nancy");
    assert_eq!(team.member[1].age, 31);

    let mut out = Vec::new();
    assert_eq!(marshal_to(&mut out, &team).unwrap(), data.len());
    assert_eq!(out, data);
}

#[test]
fn test_nested_lists() {
    let document = decode(b"lli1ei2eeli3eee").unwrap();
    let mut grid: Vec<Vec<u16>> = Vec::new();
    unmarshal(&document, &mut grid).unwrap();
    assert_eq!(grid, vec![vec![1, 2], vec![3]]);
}

#[test]
fn test_missing_keys_leave_defaults() {
    let mut user = User {
        name: "keep".into(),
        age: 1,
    };
    unmarshal(&decode(b"d3:agei40ee").unwrap(), &mut user).unwrap();
    assert_eq!(user.name, "keep");
    assert_eq!(user.age, 40);
}

#[test]
fn test_permissive_skips_mismatched_field() {
    let document = decode(b"d4:namei5e3:agei29ee").unwrap();
    let mut user = User {
        name: "before".into(),
        age: 0,
    };
    unmarshal(&document, &mut user).unwrap();
    assert_eq!(user.name, "before");
    assert_eq!(user.age, 29);
}

#[test]
fn test_strict_rejects_mismatched_field() {
    let document = decode(b"d4:namei5e3:agei29ee").unwrap();
    let mut user = User::default();
    let err = unmarshal_with(&document, &mut user, MergePolicy::Strict).unwrap_err();
    match err {
        RecordError::FieldMismatch {
            key,
            expected,
            found,
        } => {
            assert_eq!(key, "name");
            assert_eq!(expected, ValueKind::Bytes);
            assert_eq!(found, ValueKind::Integer);
        }
        other => panic!("expected field mismatch, got {other:?}"),
    }
}

#[test]
fn test_mixed_list_reports_element() {
    let document = decode(b"li1e1:ai3ee").unwrap();
    let mut list: Vec<i64> = Vec::new();
    assert!(matches!(
        unmarshal(&document, &mut list),
        Err(RecordError::ElementMismatch {
            index: 1,
            expected: ValueKind::Integer,
            found: ValueKind::Bytes,
        })
    ));

    let document = decode(b"l1:ai1ee").unwrap();
    assert!(matches!(
        unmarshal(&document, &mut list),
        Err(RecordError::ElementMismatch { index: 0, .. })
    ));
}

#[test]
fn test_list_of_values_accepts_any_kind() {
    let document = decode(b"li1e1:alee").unwrap();
    let mut list: Vec<Value> = Vec::new();
    unmarshal(&document, &mut list).unwrap();
    let kinds: Vec<_> = list.iter().map(Value::kind).collect();
    assert_eq!(
        kinds,
        vec![ValueKind::Integer, ValueKind::Bytes, ValueKind::List]
    );
    assert_eq!(list[1], Value::string("a"));
}

#[test]
fn test_marshal_sequence_rejects_missing_element() {
    let list = vec![None, Some(1i64)];
    assert!(matches!(marshal(&list), Err(RecordError::MissingValue)));

    let list = vec![Some(1i64), Some(2)];
    assert_eq!(encode(&marshal(&list).unwrap()).unwrap(), b"li1ei2ee");
}

#[test]
fn test_unsupported_shape() {
    let mut user = User::default();
    assert!(matches!(
        unmarshal(&Value::Integer(1), &mut user),
        Err(RecordError::UnsupportedShape(ValueKind::Integer))
    ));
    assert!(matches!(
        unmarshal(&Value::string("x"), &mut user),
        Err(RecordError::UnsupportedShape(ValueKind::Bytes))
    ));
}

#[test]
fn test_invalid_destination() {
    let mut user = User::default();
    assert!(matches!(
        unmarshal(&decode(b"li1ee").unwrap(), &mut user),
        Err(RecordError::InvalidDestination {
            document: ValueKind::List,
            destination: ValueKind::Dict,
        })
    ));
    assert_eq!(user, User::default());

    let mut list: Vec<i64> = Vec::new();
    assert!(matches!(
        unmarshal(&decode(b"de").unwrap(), &mut list),
        Err(RecordError::InvalidDestination { .. })
    ));
}

#[test]
fn test_integer_range_checks() {
    let mut team = Team::default();
    assert!(matches!(
        unmarshal(&decode(b"d4:sizei300ee").unwrap(), &mut team),
        Err(RecordError::IntegerOutOfRange {
            value: 300,
            target: "u8",
        })
    ));

    assert!(matches!(
        marshal(&u64::MAX),
        Err(RecordError::IntegerOutOfRange { target: "i64", .. })
    ));
}

#[test]
fn test_invalid_utf8_string_field() {
    let mut user = User::default();
    assert!(matches!(
        unmarshal(&decode(b"d4:name2:\xff\xfee").unwrap(), &mut user),
        Err(RecordError::InvalidUtf8(_))
    ));
}

#[test]
fn test_optional_and_raw_fields() {
    let data = b"d8:announce3:url12:piece lengthi16384e6:pieces2:\x01\x027:x-extrali1eee";
    let mut torrent = Torrent::default();
    unmarshal(&decode(data).unwrap(), &mut torrent).unwrap();
    assert_eq!(torrent.announce.as_deref(), Some("url"));
    assert_eq!(torrent.piece_length, 16384);
    assert_eq!(torrent.pieces, Bytes::from_static(b"\x01\x02"));
    assert_eq!(torrent.extra, Value::List(vec![Value::Integer(1)]));
    assert_eq!(encode(&marshal(&torrent).unwrap()).unwrap(), data);

    torrent.announce = None;
    let value = marshal(&torrent).unwrap();
    assert!(value.get(b"announce").is_none());

    assert!(matches!(
        marshal(&None::<i64>),
        Err(RecordError::MissingValue)
    ));
}

#[test]
fn test_untagged_field_key_is_lowercased() {
    let shouty = Shouty { Name: "x".into() };
    assert_eq!(encode(&marshal(&shouty).unwrap()).unwrap(), b"d4:name1:xe");

    let mut decoded = Shouty::default();
    unmarshal(&decode(b"d4:name1:ye").unwrap(), &mut decoded).unwrap();
    assert_eq!(decoded.Name, "y");
}
