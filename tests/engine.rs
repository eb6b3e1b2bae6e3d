use binfloat::{BigFloat, Consts, Context, Error, RoundingMode, Status, INF_POS, NAN};
use core::cmp::Ordering;
use rand::random;

const RM_ALL: [RoundingMode; 5] = [
    RoundingMode::ToEven,
    RoundingMode::ToZero,
    RoundingMode::Up,
    RoundingMode::Down,
    RoundingMode::FromZero,
];

fn num(f: f64) -> BigFloat {
    BigFloat::from_f64(f).unwrap()
}

fn random_f64(exp_range: i32) -> f64 {
    let m = random::<f64>() + 0.5;
    let e = (random::<u32>() % (2 * exp_range as u32 + 1)) as i32 - exp_range;
    let s = if random::<bool>() { 1.0 } else { -1.0 };
    s * m * 2f64.powi(e)
}

#[test]
fn free_format_round_trip() {
    for _ in 0..200 {
        let p = 32 + random::<usize>() % 300;
        let x = BigFloat::random_normal(p, -200, 200).unwrap().round(p, RoundingMode::ToEven).unwrap().value;

        let s = x.to_free(p).unwrap();
        let y = BigFloat::parse(&s, p, RoundingMode::ToEven).unwrap().value;

        assert_eq!(x.cmp_total(&y), Ordering::Equal, "{} at {}", s, p);
    }
}

#[test]
fn addition_is_monotonic() {
    for _ in 0..200 {
        let p = 32 + random::<usize>() % 200;
        let a = BigFloat::random_normal(p, -20, 20).unwrap();
        let b = BigFloat::random_normal(p, -20, 20).unwrap();
        let c = BigFloat::random_normal(p, -20, 20).unwrap();
        let (a, b) = if a <= b { (a, b) } else { (b, a) };

        for rm in RM_ALL {
            let ac = a.add(&c, p, rm).unwrap().value;
            let bc = b.add(&c, p, rm).unwrap().value;
            assert!(ac <= bc);
        }
    }
}

#[test]
fn division_by_zero() {
    let r = num(3.0).div(&num(0.0), 64, RoundingMode::ToEven).unwrap();
    assert_eq!(r.status, Status::DIV_BY_ZERO);
    assert!(r.value.is_inf() && r.value.is_positive());

    let r = num(0.0).div(&num(0.0), 64, RoundingMode::ToEven).unwrap();
    assert_eq!(r.status, Status::INVALID_OP);
    assert!(r.value.is_nan());
}

#[test]
fn total_order_is_total() {
    let mut vals = vec![NAN, INF_POS, num(-0.0), num(0.0), num(f64::NEG_INFINITY)];
    for _ in 0..30 {
        vals.push(num(random_f64(10)));
    }

    for a in &vals {
        for b in &vals {
            let ab = a.cmp_total(b);
            let ba = b.cmp_total(a);
            assert_eq!(ab, ba.reverse());
            if ab == Ordering::Equal {
                assert_eq!(a.to_f64().to_bits(), b.to_f64().to_bits());
            }
        }
    }

    assert_eq!(NAN.cmp_numeric(&num(1.0)), Err(Error::Unordered));
    assert_eq!(num(1.0).cmp_numeric(&NAN), Err(Error::Unordered));
}

#[test]
fn rounding_is_idempotent() {
    for _ in 0..100 {
        let x = BigFloat::random_normal(256, -50, 50).unwrap();
        for rm in RM_ALL {
            let p = 32 + random::<usize>() % 200;
            let r1 = x.round(p, rm).unwrap().value;
            let r2 = r1.round(p, rm).unwrap();
            assert_eq!(r2.status, Status::OK);
            assert_eq!(r1.cmp_total(&r2.value), Ordering::Equal);
        }
    }
}

#[test]
fn exact_results() {
    let mut cc = Consts::new().unwrap();

    let one = BigFloat::parse("1", 64, RoundingMode::ToEven).unwrap().value;
    let r = one.ln(64, RoundingMode::ToEven, &mut cc).unwrap();
    assert_eq!(r.status, Status::OK);
    assert!(r.value.is_zero() && r.value.is_positive());

    let r = num(-1.0).sqrt(64, RoundingMode::ToEven).unwrap();
    assert_eq!(r.status, Status::INVALID_OP);
    assert!(r.value.is_nan());

    let x = BigFloat::parse("0.1", 53, RoundingMode::ToEven).unwrap().value;
    assert_eq!(x.to_fixed(20).unwrap(), "0.10000000000000000555");

    let r = num(4.0).pow(&num(1.5), 64, RoundingMode::ToEven, &mut cc).unwrap();
    assert_eq!(r.status, Status::OK);
    assert_eq!(r.value.to_f64(), 8.0);

    let r = num(1.0).acos(64, RoundingMode::ToEven, &mut cc).unwrap();
    assert_eq!(r.status, Status::OK);
    assert!(r.value.is_zero());
}

#[test]
fn known_constants() {
    let p = 256;
    let rm = RoundingMode::ToEven;
    let mut cc = Consts::new().unwrap();
    let one = num(1.0);

    let cases: [(&str, BigFloat); 10] = [
        (
            "3.141592653589793238462643383279502884197169399375105820974944592307816",
            cc.pi(p, rm).unwrap().value,
        ),
        (
            "2.718281828459045235360287471352662497757247093699959574966967627724077",
            one.exp(p, rm, &mut cc).unwrap().value,
        ),
        (
            "0.6931471805599453094172321214581765680755001343602552541206800094933936",
            cc.ln2(p, rm).unwrap().value,
        ),
        (
            "0.8414709848078965066525023216302989996225630607983710656727517099919104",
            one.sin(p, rm, &mut cc).unwrap().value,
        ),
        (
            "0.5403023058681397174009366074429766037323104206179222276700972553811004",
            one.cos(p, rm, &mut cc).unwrap().value,
        ),
        (
            "1.557407724654902230506974807458360173087250772381520038383946605698861",
            one.tan(p, rm, &mut cc).unwrap().value,
        ),
        (
            "0.7853981633974483096156608458198757210492923498437764552437361480769541",
            one.atan(p, rm, &mut cc).unwrap().value,
        ),
        (
            "1.414213562373095048801688724209698078569671875376948073176679737990732",
            num(2.0).sqrt(p, rm).unwrap().value,
        ),
        (
            "0.5235987755982988730771072305465838140328615665625176368291574320513027",
            num(0.5).asin(p, rm, &mut cc).unwrap().value,
        ),
        (
            "2.302585092994045684017991454684364207601101488628772976033327900967573",
            num(10.0).ln(p, rm, &mut cc).unwrap().value,
        ),
    ];

    for (expected, v) in cases.iter() {
        assert_eq!(v.to_fraction(70).unwrap(), *expected);
    }

    let r = num(-0.5).acos(p, rm, &mut cc).unwrap().value;
    assert_eq!(
        r.to_fraction(70).unwrap(),
        "2.094395102393195492308428922186335256131446266250070547316629728205211"
    );

    let r = num(-1.0).exp(p, rm, &mut cc).unwrap().value;
    assert_eq!(
        r.to_fraction(70).unwrap(),
        "0.3678794411714423215955237701614608674458111310317678345078368016974615"
    );

    let r = num(2.0).pow(&num(0.5), p, rm, &mut cc).unwrap().value;
    assert_eq!(
        r.to_fraction(70).unwrap(),
        "1.414213562373095048801688724209698078569671875376948073176679737990732"
    );
}

#[test]
fn directed_rounding_brackets() {
    let mut cc = Consts::new().unwrap();
    let p = 100;

    for f in [0.3, 1.0, 2.5, -7.75, 100.0] {
        let x = num(f);
        type Fun = fn(&BigFloat, usize, RoundingMode, &mut Consts) -> Result<binfloat::StatusAnd<BigFloat>, Error>;
        let funs: [Fun; 3] = [BigFloat::exp, BigFloat::sin, BigFloat::atan];

        for fun in funs {
            let lo = fun(&x, p, RoundingMode::Down, &mut cc).unwrap().value;
            let hi = fun(&x, p, RoundingMode::Up, &mut cc).unwrap().value;
            let tz = fun(&x, p, RoundingMode::ToZero, &mut cc).unwrap().value;
            let fz = fun(&x, p, RoundingMode::FromZero, &mut cc).unwrap().value;
            let ne = fun(&x, p, RoundingMode::ToEven, &mut cc).unwrap().value;

            assert!(lo < hi);
            assert!(lo <= ne && ne <= hi);
            if lo.is_negative() {
                assert!(tz == hi && fz == lo);
            } else {
                assert!(tz == lo && fz == hi);
            }

            // one unit in the last place apart
            let d = hi.sub(&lo, p, RoundingMode::ToEven).unwrap().value;
            let ulp_exp = hi.exponent().unwrap().max(lo.exponent().unwrap()) - p as i32;
            assert!(d.exponent().unwrap() <= ulp_exp + 1);
        }
    }
}

#[test]
fn f64_agreement() {
    let mut ctx = Context::new(53, RoundingMode::ToEven).unwrap();

    let close = |a: f64, b: f64| (a - b).abs() <= b.abs() * f64::EPSILON;

    for _ in 0..300 {
        let f = random_f64(8);
        let x = num(f);

        assert_eq!(ctx.sqrt(&num(f.abs())).unwrap().value.to_f64(), f.abs().sqrt());
        assert!(close(ctx.exp(&x).unwrap().value.to_f64(), f.exp()), "exp {}", f);
        assert!(close(ctx.ln(&num(f.abs())).unwrap().value.to_f64(), f.abs().ln()), "ln {}", f);
        assert!(close(ctx.sin(&x).unwrap().value.to_f64(), f.sin()), "sin {}", f);
        assert!(close(ctx.cos(&x).unwrap().value.to_f64(), f.cos()), "cos {}", f);
        assert!(close(ctx.tan(&x).unwrap().value.to_f64(), f.tan()), "tan {}", f);
        assert!(close(ctx.atan(&x).unwrap().value.to_f64(), f.atan()), "atan {}", f);

        let g = f / 256.0;
        if g.abs() < 1.0 {
            let y = num(g);
            assert!(close(ctx.asin(&y).unwrap().value.to_f64(), g.asin()), "asin {}", g);
            assert!(close(ctx.acos(&y).unwrap().value.to_f64(), g.acos()), "acos {}", g);
        }

        let a = random_f64(4);
        let b = random_f64(4);
        let (na, nb) = (num(a), num(b));
        assert_eq!(ctx.add(&na, &nb).unwrap().value.to_f64(), a + b);
        assert_eq!(ctx.sub(&na, &nb).unwrap().value.to_f64(), a - b);
        assert_eq!(ctx.mul(&na, &nb).unwrap().value.to_f64(), a * b);
        assert_eq!(ctx.div(&na, &nb).unwrap().value.to_f64(), a / b);

        let pw = ctx.pow(&num(a.abs()), &nb).unwrap().value.to_f64();
        assert!(close(pw, a.abs().powf(b)), "pow {} {}", a, b);
    }
}

#[test]
fn overflow_and_underflow() {
    let mut cc = Consts::new().unwrap();
    let rm = RoundingMode::ToEven;

    let big = BigFloat::parse("1e700000000", 64, rm).unwrap();
    assert_eq!(big.status, Status::OVERFLOW | Status::INEXACT);
    assert!(big.value.is_inf());

    let big = BigFloat::parse("-1e800000000", 64, rm).unwrap();
    assert_eq!(big.status, Status::OVERFLOW | Status::INEXACT);
    assert!(big.value.is_inf() && big.value.is_negative());

    let r = num(-5e9).exp(64, rm, &mut cc).unwrap();
    assert_eq!(r.status, Status::UNDERFLOW | Status::INEXACT);
    assert!(r.value.is_zero() && r.value.is_positive());

    let x = BigFloat::parse("1e500000000", 64, rm).unwrap().value;
    let r = x.mul(&x, 64, rm).unwrap();
    assert_eq!(r.status, Status::OVERFLOW | Status::INEXACT);
    assert!(r.value.is_inf());

    let r = num(1.0).div(&x, 64, rm).unwrap().value.div(&x, 64, rm).unwrap();
    assert_eq!(r.status, Status::UNDERFLOW | Status::INEXACT);
    assert!(r.value.is_zero());
}

#[test]
fn precision_is_checked() {
    let mut cc = Consts::new().unwrap();
    let x = num(1.0);
    assert_eq!(x.add(&x, 31, RoundingMode::ToEven).err(), Some(Error::InvalidPrecision(31)));
    assert_eq!(x.exp(0, RoundingMode::ToEven, &mut cc).err(), Some(Error::InvalidPrecision(0)));
    assert_eq!(BigFloat::parse("1", 16, RoundingMode::ToEven).err(), Some(Error::InvalidPrecision(16)));
    assert_eq!(x.to_free(8).err(), Some(Error::InvalidPrecision(8)));
}
