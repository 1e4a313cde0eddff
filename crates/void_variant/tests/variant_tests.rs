//! Integration tests for void_variant

use std::mem::size_of;

use void_variant::math::*;
use void_variant::*;

type Accessor = fn(&Variant) -> Result<()>;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn host_methods() -> MethodRegistry {
    let registry = MethodRegistry::new();
    registry.register(NativeMethod::new("add", 2, |_, args| {
        let a: i64 = argument(args, 0)?;
        let b: i64 = argument(args, 1)?;
        Ok(Variant::from(a.wrapping_add(b)))
    }));
    registry.register(NativeMethod::new("length", 0, |receiver, _| {
        let text = receiver
            .as_str()
            .map_err(|_| CallError::InvalidArgument { index: 0, expected: VariantType::String })?;
        Ok(Variant::from(text.len()))
    }));
    registry
}

/// One value of every kind, in discriminant order
fn one_of_each_kind() -> Vec<Variant> {
    let mut dict = Dictionary::new();
    dict.insert("key", 1);
    let owner = ObjectId::new(7);
    vec![
        Variant::Nil,
        Variant::from(true),
        Variant::from(1),
        Variant::from(1.5),
        Variant::from("text"),
        Variant::from(Vector2::ONE),
        Variant::from(Vector2i::ONE),
        Variant::from(Rect2::new(Vector2::ZERO, Vector2::ONE)),
        Variant::from(Rect2i::new(Vector2i::ZERO, Vector2i::ONE)),
        Variant::from(Vector3::ONE),
        Variant::from(Vector3i::ONE),
        Variant::from(Transform2D::from_translation(Vector2::ONE)),
        Variant::from(Vector4::ONE),
        Variant::from(Vector4i::ONE),
        Variant::from(Plane::new(Vector3::Y, 2.0)),
        Variant::from(Quaternion::IDENTITY),
        Variant::from(Aabb::new(Vector3::ZERO, Vector3::ONE)),
        Variant::from(Basis::IDENTITY),
        Variant::from(Transform3D::IDENTITY),
        Variant::from(Projection::IDENTITY),
        Variant::from(Color::WHITE),
        Variant::from(StringName::new("name")),
        Variant::from(NodePath::new("root/child")),
        Variant::from(Rid::new(3)),
        Variant::from(owner),
        Variant::from(Callable::new(owner, "run")),
        Variant::from(Signal::new(owner, "done")),
        Variant::from(dict),
        Variant::from(varargs![1, "two"]),
        Variant::from(vec![1u8, 2, 3]),
        Variant::from(vec![1i32, 2]),
        Variant::from(vec![1i64, 2]),
        Variant::from(vec![1.0f32]),
        Variant::from(vec![1.0f64]),
        Variant::from(vec![String::from("a")]),
        Variant::from(vec![Vector2::X]),
        Variant::from(vec![Vector3::X]),
        Variant::from(vec![Color::BLACK]),
    ]
}

fn accessor(kind: VariantType, read: Accessor) -> (VariantType, Accessor) {
    (kind, read)
}

/// The single-kind accessor for every non-nil kind
fn accessors() -> Vec<(VariantType, Accessor)> {
    vec![
        accessor(VariantType::Bool, |v| v.as_bool().map(drop)),
        accessor(VariantType::Int, |v| v.as_int().map(drop)),
        accessor(VariantType::Float, |v| v.as_float().map(drop)),
        accessor(VariantType::String, |v| v.as_text().map(drop)),
        accessor(VariantType::Vector2, |v| v.as_vector2().map(drop)),
        accessor(VariantType::Vector2i, |v| v.as_vector2i().map(drop)),
        accessor(VariantType::Rect2, |v| v.as_rect2().map(drop)),
        accessor(VariantType::Rect2i, |v| v.as_rect2i().map(drop)),
        accessor(VariantType::Vector3, |v| v.as_vector3().map(drop)),
        accessor(VariantType::Vector3i, |v| v.as_vector3i().map(drop)),
        accessor(VariantType::Transform2D, |v| v.as_transform2d().map(drop)),
        accessor(VariantType::Vector4, |v| v.as_vector4().map(drop)),
        accessor(VariantType::Vector4i, |v| v.as_vector4i().map(drop)),
        accessor(VariantType::Plane, |v| v.as_plane().map(drop)),
        accessor(VariantType::Quaternion, |v| v.as_quaternion().map(drop)),
        accessor(VariantType::Aabb, |v| v.as_aabb().map(drop)),
        accessor(VariantType::Basis, |v| v.as_basis().map(drop)),
        accessor(VariantType::Transform3D, |v| v.as_transform3d().map(drop)),
        accessor(VariantType::Projection, |v| v.as_projection().map(drop)),
        accessor(VariantType::Color, |v| v.as_color().map(drop)),
        accessor(VariantType::StringName, |v| v.as_string_name().map(drop)),
        accessor(VariantType::NodePath, |v| v.as_node_path().map(drop)),
        accessor(VariantType::Rid, |v| v.as_rid().map(drop)),
        accessor(VariantType::Object, |v| v.as_object().map(drop)),
        accessor(VariantType::Callable, |v| v.as_callable().map(drop)),
        accessor(VariantType::Signal, |v| v.as_signal().map(drop)),
        accessor(VariantType::Dictionary, |v| v.as_dictionary().map(drop)),
        accessor(VariantType::Array, |v| v.as_array().map(drop)),
        accessor(VariantType::PackedByteArray, |v| v.as_bytes().map(drop)),
        accessor(VariantType::PackedInt32Array, |v| v.i32_array().map(drop)),
        accessor(VariantType::PackedInt64Array, |v| v.i64_array().map(drop)),
        accessor(VariantType::PackedFloat32Array, |v| v.f32_array().map(drop)),
        accessor(VariantType::PackedFloat64Array, |v| v.f64_array().map(drop)),
        accessor(VariantType::PackedStringArray, |v| v.string_array().map(drop)),
        accessor(VariantType::PackedVector2Array, |v| v.vector2_array().map(drop)),
        accessor(VariantType::PackedVector3Array, |v| v.vector3_array().map(drop)),
        accessor(VariantType::PackedColorArray, |v| v.color_array().map(drop)),
    ]
}

#[test]
fn test_samples_cover_every_kind() {
    let kinds: Vec<VariantType> = one_of_each_kind().iter().map(Variant::get_type).collect();
    assert_eq!(kinds, VariantType::ALL.to_vec());

    let mut covered: Vec<VariantType> = accessors().iter().map(|(kind, _)| *kind).collect();
    covered.insert(0, VariantType::Nil);
    assert_eq!(covered, VariantType::ALL.to_vec());
}

#[test]
fn test_every_accessor_accepts_only_its_kind() {
    for value in one_of_each_kind() {
        let found = value.get_type();
        for (kind, read) in accessors() {
            // the text accessor also reads byte arrays
            let shared = kind == VariantType::String && found == VariantType::PackedByteArray;
            match read(&value) {
                Ok(()) => assert!(
                    kind == found || shared,
                    "{} accessor accepted a {}",
                    kind,
                    found
                ),
                Err(err) => {
                    assert!(kind != found && !shared, "{} accessor rejected its own kind", kind);
                    assert_eq!(err, VariantError::TypeMismatch { expected: kind, found });
                }
            }
        }
    }
}

#[test]
fn test_kind_exclusivity() {
    let v = Variant::from(3.25f32);
    assert_eq!(v.get_type(), VariantType::Float);
    assert!(v.as_float().is_ok());
    assert!(v.as_int().is_err());
    assert!(v.as_bool().is_err());
    assert!(v.as_text().is_err());

    // the two text-backed kinds share the text accessors
    let s = Variant::from("abc");
    let b = Variant::from(b"abc".to_vec());
    assert_eq!(s.as_str(), Ok("abc"));
    assert_eq!(b.as_str(), Ok("abc"));
    assert!(s.as_bytes().is_err());
    assert_eq!(b.as_bytes(), Ok(&b"abc"[..]));
}

#[test]
fn test_copy_independence() {
    let mut source = Variant::from("hello");
    let copy = source.clone();
    source.as_text_mut().unwrap().push_str(" world");
    assert_eq!(copy.as_str(), Ok("hello"));
    assert_eq!(source.as_str(), Ok("hello world"));

    let mut floats = Variant::from(vec![1.0f32, 2.0]);
    let floats_copy = floats.clone();
    floats.f32_array_mut().unwrap()[0] = 9.0;
    assert_eq!(floats_copy.f32_array().unwrap(), &vec![1.0f32, 2.0]);

    let mut doubles = Variant::from(vec![1.0f64]);
    let doubles_copy = doubles.clone();
    doubles.f64_array_mut().unwrap().push(2.0);
    assert_eq!(doubles_copy.f64_array().unwrap().len(), 1);
    assert_eq!(doubles.f64_array().unwrap().len(), 2);

    let mut bytes = Variant::from(vec![1u8, 2, 3]);
    let bytes_copy = bytes.clone();
    bytes.as_bytes_mut().unwrap()[0] = 0xaa;
    bytes.byte_array_mut().unwrap().push(4);
    assert_eq!(bytes_copy.as_bytes(), Ok(&[1u8, 2, 3][..]));
    assert_eq!(bytes.as_bytes(), Ok(&[0xaau8, 2, 3, 4][..]));

    let mut array = Variant::from(varargs![1, "two"]);
    let array_copy = array.clone();
    array.as_array_mut().unwrap().push(Variant::from(3));
    assert_eq!(array_copy.as_array().unwrap().len(), 2);

    let mut dict = Variant::from(Dictionary::new());
    let dict_copy = dict.clone();
    dict.as_dictionary_mut().unwrap().insert("k", 1);
    assert!(dict_copy.as_dictionary().unwrap().is_empty());

    for value in one_of_each_kind() {
        let copy = value.clone();
        assert_eq!(copy, value);
        assert_eq!(copy.get_type(), value.get_type());
    }
}

#[test]
fn test_move_leaves_source_empty() {
    let mut source = Variant::from(vec![1.0f64, 2.0, 3.0]);
    let target = source.take();
    assert!(source.is_nil());
    assert!(source.f64_array().is_err());
    assert_eq!(target.f64_array().unwrap().len(), 3);

    for mut source in one_of_each_kind() {
        let kind = source.get_type();
        let target = source.take();
        assert_eq!(target.get_type(), kind);
        assert!(source.is_nil());
        for (accessor_kind, read) in accessors() {
            assert_eq!(
                read(&source),
                Err(VariantError::TypeMismatch {
                    expected: accessor_kind,
                    found: VariantType::Nil,
                })
            );
        }
    }

    let mut slot = Variant::from("previous");
    let mut incoming = Variant::from(7);
    slot.assign_from(&mut incoming);
    assert_eq!(slot, Variant::Int(7));
    assert!(incoming.is_nil());
}

#[test]
fn test_equality_under_kind_mismatch() {
    let int = Variant::from(1);
    let float = Variant::from(1.0);
    assert_ne!(int, float);
    assert_eq!(
        Variant::evaluate(Operator::Equal, &int, &float),
        Some(Variant::Bool(false))
    );
    assert_eq!(
        Variant::evaluate(Operator::NotEqual, &int, &float),
        Some(Variant::Bool(true))
    );

    // zero-like values of different kinds are never equal
    let zeros = [
        Variant::Nil,
        Variant::from(false),
        Variant::from(0),
        Variant::from(0.0),
        Variant::from(""),
        Variant::from(Vec::<u8>::new()),
    ];
    for (i, a) in zeros.iter().enumerate() {
        for (j, b) in zeros.iter().enumerate() {
            assert_eq!(a == b, i == j, "{:?} vs {:?}", a, b);
            assert_eq!(
                Variant::evaluate(Operator::Equal, a, b),
                Some(Variant::Bool(i == j))
            );
            assert_eq!(
                Variant::evaluate(Operator::NotEqual, a, b),
                Some(Variant::Bool(i != j))
            );
        }
    }

    let samples = one_of_each_kind();
    for (i, a) in samples.iter().enumerate() {
        for (j, b) in samples.iter().enumerate() {
            assert_eq!(a == b, i == j, "{} vs {}", a.get_type(), b.get_type());
        }
    }
}

#[test]
fn test_ordering_falls_back_to_kind_order() {
    let big_int = Variant::from(i64::MAX);
    let float = Variant::from(-1.0);
    // Int precedes Float in kind order, whatever the payloads
    assert!(big_int < float);
    assert!(Variant::Nil < Variant::from(false));

    assert!(Variant::from(2) < Variant::from(3));
    assert!(Variant::from("apple") < Variant::from("banana"));
    assert!(Variant::from(Vector2i::new(1, 5)) < Variant::from(Vector2i::new(2, 0)));

    let mut values = vec![
        Variant::from("b"),
        Variant::from(10),
        Variant::Nil,
        Variant::from(-5),
        Variant::from("a"),
    ];
    let samples = one_of_each_kind();
    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            assert_eq!(
                Variant::evaluate(Operator::Less, a, b),
                Some(Variant::Bool(true)),
                "{} < {}",
                a.get_type(),
                b.get_type()
            );
            assert!(b > a);
        }
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(
        values,
        vec![
            Variant::Nil,
            Variant::from(-5),
            Variant::from(10),
            Variant::from("a"),
            Variant::from("b"),
        ]
    );
}

#[test]
fn test_narrowing_truncates() {
    let v = Variant::from(300);
    assert_eq!(v.to::<u8>(), Ok(44));
    assert_eq!(u8::try_from(&v), Ok(44));
    assert_eq!(v.to::<i8>(), Ok(44));
    assert_eq!(Variant::from(-1).to::<u16>(), Ok(u16::MAX));
}

#[test]
fn test_text_round_trip() {
    let v = Variant::from("hello");
    assert_eq!(v.as_str(), Ok("hello"));
    assert_eq!(v.to::<String>(), Ok(String::from("hello")));
    assert_eq!(
        v.as_bool(),
        Err(VariantError::TypeMismatch {
            expected: VariantType::Bool,
            found: VariantType::String,
        })
    );

    let binary = Variant::from(vec![0xffu8, 0xfe]);
    assert_eq!(
        binary.as_str(),
        Err(VariantError::InvalidUtf8 { found: VariantType::PackedByteArray })
    );
}

#[test]
fn test_dispatch_propagates_results() {
    init_logger();
    let registry = host_methods();

    let mut ret = Variant::Nil;
    let mut error = CALL_OK;
    Variant::Nil.callp_raw(&registry, "does_not_exist", &[], &mut ret, &mut error);
    assert_ne!(error, CALL_OK);
    assert!(ret.is_nil());

    Variant::Nil.callp_raw(&registry, "add", &varargs![2, 3], &mut ret, &mut error);
    assert_eq!(error, CALL_OK);
    assert_eq!(ret, Variant::Int(5));

    let len = Variant::from("four").method_call(&registry, "length", Vec::<Variant>::new());
    assert_eq!(len, Ok(Variant::Int(4)));

    let err = Variant::from(4).method_call(&registry, "length", Vec::<Variant>::new());
    assert_eq!(err.map_err(|e| e.code()), Err(CallError::INVALID_ARGUMENT));
}

#[test]
fn test_containers_hold_mixed_kinds() {
    let mut inventory = Dictionary::new();
    inventory.insert("sword", 1);
    inventory.insert(StringName::new("shield"), true);
    inventory.insert(Rid::new(9), Vector3::ONE);

    let v = Variant::from(inventory);
    let dict = v.as_dictionary().unwrap();
    assert_eq!(dict.get(&Variant::from("sword")), Some(&Variant::Int(1)));
    // StringName and String keys are distinct kinds
    assert!(dict.get(&Variant::from("shield")).is_none());
    assert_eq!(
        Variant::evaluate(Operator::In, &Variant::from(Rid::new(9)), &v),
        Some(Variant::Bool(true))
    );

    let nested = Variant::from(varargs![1, "two", varargs![3.0]]);
    assert_eq!(nested.as_array().unwrap().len(), 3);
    assert_eq!(nested.to_string(), "[1, two, [3]]");
}

#[test]
fn test_settings_registry_round_trip() {
    init_logger();
    let registry = SettingsRegistry::new();
    SandboxSettings::register_defaults(&registry);
    assert!(registry.has_setting(SandboxSettings::DOCKER_PATH));
    assert!(SandboxSettings::docker_path(&registry).is_ok());

    registry.set(SandboxSettings::DOCKER_PATH, 5);
    assert!(matches!(
        SandboxSettings::docker_path(&registry),
        Err(SettingsError::TypeMismatch { found: VariantType::Int, .. })
    ));
}

#[test]
fn test_inline_payloads_fit_budget() {
    let inline = [
        (VariantType::Vector2, size_of::<Vector2>()),
        (VariantType::Vector2i, size_of::<Vector2i>()),
        (VariantType::Rect2, size_of::<Rect2>()),
        (VariantType::Rect2i, size_of::<Rect2i>()),
        (VariantType::Vector3, size_of::<Vector3>()),
        (VariantType::Vector3i, size_of::<Vector3i>()),
        (VariantType::Transform2D, size_of::<Transform2D>()),
        (VariantType::Vector4, size_of::<Vector4>()),
        (VariantType::Vector4i, size_of::<Vector4i>()),
        (VariantType::Plane, size_of::<Plane>()),
        (VariantType::Quaternion, size_of::<Quaternion>()),
        (VariantType::Aabb, size_of::<Aabb>()),
        (VariantType::Color, size_of::<Color>()),
    ];
    for (kind, size) in inline {
        assert!(size <= VARIANT_PAYLOAD_SIZE, "{} is {} bytes inline", kind, size);
        assert_eq!(kind.inline_payload_size(), Some(size), "{}", kind);
    }
    let inline_kinds: Vec<VariantType> = inline.iter().map(|(kind, _)| *kind).collect();
    for kind in VariantType::ALL {
        assert_eq!(kind.is_inline_opaque(), inline_kinds.contains(&kind), "{}", kind);
    }

    // boxed aggregates stay out of the inline slot
    assert!(size_of::<Basis>() > VARIANT_PAYLOAD_SIZE);
    assert!(size_of::<Transform3D>() > VARIANT_PAYLOAD_SIZE);
    assert!(size_of::<Projection>() > VARIANT_PAYLOAD_SIZE);

    for value in one_of_each_kind() {
        let kind = value.get_type();
        assert_eq!(value.opaque_payload().is_some(), kind.is_inline_opaque(), "{}", kind);
    }
    let payload = Variant::from(Color::rgb(1.0, 0.5, 0.0)).opaque_payload().unwrap();
    assert_eq!(payload.len(), VARIANT_PAYLOAD_SIZE);
}
