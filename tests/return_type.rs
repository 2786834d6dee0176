use mapwire::{
    errors::Error,
    operations::map::{self, split_flags, ReturnModifiers, ReturnType},
};

mod common;

#[test]
fn codes_are_stable() {
    common::init_logger();

    let codes = ReturnType::ALL.map(ReturnType::code);
    assert_eq!([0, 1, 2, 3, 4, 5, 6, 7, 8], codes);

    for rt in ReturnType::ALL {
        assert_eq!(rt, ReturnType::try_from(u8::from(rt)).unwrap());
    }
}

#[test]
fn unknown_codes_are_rejected() {
    common::init_logger();

    for code in 9..=u8::MAX {
        let err = ReturnType::try_from(code).unwrap_err();
        assert!(matches!(err, Error::InvalidReturnType(c) if c == code));
    }
}

#[test]
fn names() {
    common::init_logger();

    let names = ReturnType::ALL.map(|rt| rt.to_string());
    assert_eq!(
        [
            "NONE",
            "INDEX",
            "REVERSE_INDEX",
            "RANK",
            "REVERSE_RANK",
            "COUNT",
            "KEY",
            "VALUE",
            "KEY_VALUE"
        ],
        names
    );

    for rt in ReturnType::ALL {
        assert_eq!(rt, rt.name().parse::<ReturnType>().unwrap());
    }
}

#[test]
fn flags_byte_of_encoded_requests() {
    common::init_logger();

    for rt in ReturnType::ALL {
        let op = map::get_by_rank(0, rt);
        let plain = mapwire::encode(&op).unwrap();
        let inverted = mapwire::encode(&op.clone().inverted()).unwrap();

        assert_eq!(rt.code(), plain[1]);
        assert_eq!(rt.code() | 0x10, inverted[1]);
        assert_eq!(
            (rt, ReturnModifiers::INVERTED),
            split_flags(inverted[1]).unwrap()
        );
    }
}

#[cfg(feature = "serialization")]
#[test]
fn serialized_as_wire_name() {
    common::init_logger();

    let json = serde_json::to_string(&ReturnType::ReverseRank).unwrap();
    assert_eq!("\"REVERSE_RANK\"", json);

    let rt: ReturnType = serde_json::from_str("\"KEY_VALUE\"").unwrap();
    assert_eq!(ReturnType::KeyValue, rt);

    let policy: mapwire::policy::CodecPolicy =
        serde_json::from_str(r#"{"max_argument_size": 64}"#).unwrap();
    assert_eq!(64, policy.max_argument_size);
    assert_eq!(
        mapwire::policy::CodecPolicy::DEFAULT_MAX_RESPONSE_SIZE,
        policy.max_response_size
    );
}
