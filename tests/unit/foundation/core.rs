use super::*;

#[test]
fn hex_parse_accepts_both_forms() {
    assert_eq!(Rgb::from_hex("#1F3D2B").unwrap(), Rgb::new(0x1F, 0x3D, 0x2B));
    assert_eq!(Rgb::from_hex("1f3d2b").unwrap(), Rgb::new(0x1F, 0x3D, 0x2B));
    assert!(Rgb::from_hex("#12345").is_err());
    assert!(Rgb::from_hex("#GG0000").is_err());
}

#[test]
fn const_shorthand_matches_parser() {
    assert_eq!(rgb(0x2563EB), Rgb::from_hex("#2563EB").unwrap());
    assert_eq!(rgb(0x2563EB).hex(), "2563EB");
}

#[test]
fn serde_uses_hex_strings() {
    let s = serde_json::to_string(&Rgb::new(255, 0, 16)).unwrap();
    assert_eq!(s, "\"#FF0010\"");
    let back: Rgb = serde_json::from_str(&s).unwrap();
    assert_eq!(back, Rgb::new(255, 0, 16));
}

#[test]
fn lerp_hits_endpoints() {
    let a = Rgb::new(0, 0, 0);
    let b = Rgb::new(200, 100, 50);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
}
