// Tests for #[derive(XdrCodec)] on structs, enums and unions
#![allow(clippy::unwrap_used)]

use std::io::Cursor;

use nfsv3_types::xdr_codec::{Error, Opaque, Pack, Unpack, XdrCodec, from_bytes, to_bytes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, XdrCodec)]
#[repr(u32)]
enum Color {
    Red = 1,
    Green = 2,
    Blue = 10,
}

#[derive(Debug, PartialEq, Eq, XdrCodec)]
struct Simple {
    a: u32,
    b: u64,
    name: String,
}

#[derive(Debug, PartialEq, Eq, XdrCodec)]
struct Nested {
    first: Simple,
    color: Color,
    flag: bool,
}

#[derive(Debug, PartialEq, Eq, XdrCodec)]
struct Borrowing<'a> {
    id: u32,
    data: Opaque<'a>,
}

#[derive(Debug, PartialEq, Eq, XdrCodec)]
struct Pair(u32, bool);

#[derive(Debug, PartialEq, Eq, XdrCodec)]
struct Empty;

#[derive(Debug, PartialEq, Eq, XdrCodec)]
enum Shape {
    #[xdr(0)]
    Nothing,
    #[xdr(3)]
    Square(u32),
    #[xdr(7)]
    Labelled(Simple),
}

#[test]
fn enum_pack() {
    assert_eq!(to_bytes(&Color::Red).unwrap(), [0, 0, 0, 1]);
    assert_eq!(to_bytes(&Color::Blue).unwrap(), [0, 0, 0, 10]);
    assert_eq!(Color::Green.packed_size(), 4);
}

#[test]
fn enum_unpack() {
    fn unpack(buf: [u8; 4]) -> Color {
        let mut cursor = Cursor::new(buf);
        Color::unpack(&mut cursor).unwrap().0
    }

    assert_eq!(unpack([0, 0, 0, 1]), Color::Red);
    assert_eq!(unpack([0, 0, 0, 2]), Color::Green);
    assert_eq!(unpack([0, 0, 0, 10]), Color::Blue);

    let err = from_bytes::<Color>(&[0, 0, 0, 3]).unwrap_err();
    assert!(matches!(err, Error::InvalidEnumValue(3)));
}

#[test]
fn simple_struct_serialization() {
    let value = Simple {
        a: 1,
        b: 2,
        name: String::from("abc"),
    };
    let buffer = to_bytes(&value).unwrap();
    assert_eq!(
        buffer,
        [
            0, 0, 0, 1, // a
            0, 0, 0, 0, 0, 0, 0, 2, // b
            0, 0, 0, 3, b'a', b'b', b'c', 0, // name
        ]
    );
    assert_eq!(value.packed_size(), buffer.len());

    let (decoded, len) = from_bytes::<Simple>(&buffer).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(len, buffer.len());
}

#[test]
fn nested_struct_serialization() {
    let value = Nested {
        first: Simple {
            a: 0xdead_beef,
            b: u64::MAX,
            name: String::new(),
        },
        color: Color::Blue,
        flag: true,
    };
    let buffer = to_bytes(&value).unwrap();
    assert_eq!(buffer.len(), 4 + 8 + 4 + 4 + 4);
    assert_eq!(&buffer[16..], [0, 0, 0, 10, 0, 0, 0, 1]);

    let (decoded, _) = from_bytes::<Nested>(&buffer).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn struct_with_lifetime_serialization() {
    let payload = [1u8, 2, 3, 4, 5];
    let value = Borrowing {
        id: 9,
        data: Opaque::borrowed(&payload),
    };
    let buffer = to_bytes(&value).unwrap();
    assert_eq!(buffer, [0, 0, 0, 9, 0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0]);

    let (decoded, len) = from_bytes::<Borrowing>(&buffer).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(len, 16);
}

#[test]
fn tuple_struct_serialization() {
    let buffer = to_bytes(&Pair(5, false)).unwrap();
    assert_eq!(buffer, [0, 0, 0, 5, 0, 0, 0, 0]);
    assert_eq!(from_bytes::<Pair>(&buffer).unwrap(), (Pair(5, false), 8));
}

#[test]
fn unit_struct_serialization() {
    assert!(to_bytes(&Empty).unwrap().is_empty());
    assert_eq!(Empty.packed_size(), 0);
    assert_eq!(from_bytes::<Empty>(&[]).unwrap(), (Empty, 0));
}

#[test]
fn union_unit_arm() {
    let buffer = to_bytes(&Shape::Nothing).unwrap();
    assert_eq!(buffer, [0, 0, 0, 0]);
    assert_eq!(from_bytes::<Shape>(&buffer).unwrap(), (Shape::Nothing, 4));
}

#[test]
fn union_data_arm() {
    let buffer = to_bytes(&Shape::Square(16)).unwrap();
    assert_eq!(buffer, [0, 0, 0, 3, 0, 0, 0, 16]);
    assert_eq!(Shape::Square(16).packed_size(), 8);
    assert_eq!(from_bytes::<Shape>(&buffer).unwrap(), (Shape::Square(16), 8));

    let labelled = Shape::Labelled(Simple {
        a: 1,
        b: 1,
        name: String::from("x"),
    });
    let buffer = to_bytes(&labelled).unwrap();
    assert_eq!(&buffer[..4], [0, 0, 0, 7]);
    assert_eq!(labelled.packed_size(), buffer.len());
    assert_eq!(from_bytes::<Shape>(&buffer).unwrap().0, labelled);
}

#[test]
fn union_unknown_tag() {
    let err = from_bytes::<Shape>(&[0, 0, 0, 1, 0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, Error::InvalidEnumValue(1)));
}

#[test]
fn struct_truncated_mid_field() {
    let err = from_bytes::<Simple>(&[0, 0, 0, 1, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, Error::TruncatedData));
}
