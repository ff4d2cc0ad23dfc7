//! Behavioral guarantees of the copy engine, one scenario each

use std::collections::BTreeMap;

use deepcopier::{Context, Error, NullString, Reflect, copy};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Src {
    name: String,
    age: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Dst {
    name: String,
    age: i32,
}

#[test]
fn test_plain_copy() {
    let src = Src {
        name: "Chuck".to_string(),
        age: 10,
    };
    let mut dst = Dst::default();
    copy(&src).to(&mut dst).unwrap();
    assert_eq!(
        dst,
        Dst {
            name: "Chuck".to_string(),
            age: 10,
        }
    );
}

// ============================================================================
// Round trip
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Profile {
    handle: String,
    score: u32,
    ratio: f64,
    active: bool,
    aliases: Vec<String>,
    counters: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct ProfileResource {
    handle: String,
    score: u32,
    ratio: f64,
    active: bool,
    aliases: Vec<String>,
    counters: BTreeMap<String, i64>,
}

#[test]
fn test_round_trip() {
    let profile = Profile {
        handle: "chuck".to_string(),
        score: 99,
        ratio: 0.25,
        active: true,
        aliases: vec!["walker".to_string()],
        counters: BTreeMap::from([("kicks".to_string(), 1000)]),
    };

    let mut resource = ProfileResource::default();
    copy(&profile).to(&mut resource).unwrap();

    let mut back = Profile::default();
    copy(&mut back).from(&resource).unwrap();
    assert_eq!(back, profile);
}

// ============================================================================
// Skip
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[deepcopier(methods)]
struct WithSecret {
    skipped: String,
}

#[deepcopier::methods]
impl WithSecret {
    pub fn get_skipped(&self) -> String {
        "from method".to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct SkipsSecret {
    #[deepcopier("skip")]
    skipped: String,
}

#[test]
fn test_skip_is_absolute() {
    let src = WithSecret {
        skipped: "x".to_string(),
    };

    let mut dst = SkipsSecret::default();
    copy(&src).strict().to(&mut dst).unwrap();
    assert_eq!(dst.skipped, "");

    // Also in reverse, where the tag sits on the value read from.
    let mut back = WithSecret::default();
    copy(&mut back)
        .from(&SkipsSecret {
            skipped: "y".to_string(),
        })
        .unwrap();
    assert_eq!(back.skipped, "");
}

// ============================================================================
// Renames
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct HasInt {
    int: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct RenamesInt {
    #[deepcopier("field:int")]
    my_int: i64,
}

#[test]
fn test_rename_resolution() {
    let mut dst = RenamesInt::default();
    copy(&HasInt { int: 42 }).to(&mut dst).unwrap();
    assert_eq!(dst.my_int, 42);
}

// ============================================================================
// Optional unwrap
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct MaybeInt {
    int: Option<i64>,
}

#[test]
fn test_option_unwraps_into_plain() {
    let mut dst = HasInt::default();
    copy(&MaybeInt { int: Some(7) }).to(&mut dst).unwrap();
    assert_eq!(dst.int, 7);

    let mut dst = HasInt::default();
    copy(&MaybeInt { int: None }).to(&mut dst).unwrap();
    assert_eq!(dst.int, 0);
}

// ============================================================================
// Getter fallback with context
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[deepcopier(methods)]
struct Computed {
    seed: String,
}

#[deepcopier::methods]
impl Computed {
    pub fn get_x(&self, context: &Context) -> String {
        let k = context.get_as::<String>("k").unwrap_or_default();
        format!("{}:{}", self.seed, k)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct WantsX {
    #[deepcopier("context")]
    x: String,
}

#[test]
fn test_getter_fallback_with_context() {
    let src = Computed {
        seed: "s".to_string(),
    };
    let mut dst = WantsX::default();
    copy(&src)
        .with_context(Context::new().with("k", "v"))
        .to(&mut dst)
        .unwrap();
    assert_eq!(dst.x, "s:v");
}

// ============================================================================
// Embedded flattening
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Audit {
    created_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Document {
    title: String,
    #[deepcopier(embed)]
    audit: Audit,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct FlatDocument {
    title: String,
    created_by: String,
}

#[test]
fn test_embedded_flattening() {
    let flat = FlatDocument {
        title: "Memo".to_string(),
        created_by: "chuck".to_string(),
    };
    let mut document = Document::default();
    copy(&flat).to(&mut document).unwrap();
    assert_eq!(document.audit.created_by, "chuck");
    assert_eq!(document.title, "Memo");
}

// ============================================================================
// Unaddressable destinations
// ============================================================================

#[test]
fn test_unaddressable_destination_fails_without_writes() {
    let src = Src {
        name: "Chuck".to_string(),
        age: 10,
    };
    let dst = Dst::default();
    let err = copy(&src).to(&dst).unwrap_err();
    assert!(matches!(err, Error::UnaddressableDestination));
    assert_eq!(dst, Dst::default());
}

// ============================================================================
// Nullable wrappers
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct HasNullable {
    name: NullString,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct PlainName {
    name: String,
}

#[test]
fn test_invalid_nullable_unforced_leaves_destination() {
    let src = HasNullable {
        name: NullString {
            value: "payload".to_string(),
            valid: false,
        },
    };
    let mut dst = PlainName::default();
    copy(&src).to(&mut dst).unwrap();
    assert_eq!(dst.name, "");
}
