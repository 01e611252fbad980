use anyhow::{bail, Context, Result};

use gbcore::{Flag, RegisterFile, RegisterInit, Registers};

const USAGE: &str = "Usage: regs_dump [zero|dmg] [AF [BC [DE [HL [SP [PC]]]]]]";

/// Parse a hex word with an optional `0x`/`0X` prefix. Signs and empty
/// digit strings are rejected.
fn parse_word(name: &str, text: &str) -> Result<u16> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        bail!("invalid {name} value '{text}', expected a hex word");
    }
    u16::from_str_radix(digits, 16)
        .with_context(|| format!("invalid {name} value '{text}', expected a hex word"))
}

fn is_hex_word(text: &str) -> bool {
    parse_word("", text).is_ok()
}

/// Build the start state from the arguments after the program name.
fn parse_args<I>(args: I) -> Result<RegisterInit>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    let mut init = match args.peek().map(String::as_str) {
        Some("zero") => {
            args.next();
            RegisterInit::default()
        }
        Some("dmg") => {
            args.next();
            RegisterInit::dmg()
        }
        // A leading word that reads as a name is a preset, even a misspelt one.
        Some(name)
            if name.starts_with(|c: char| c.is_ascii_alphabetic()) && !is_hex_word(name) =>
        {
            bail!("unknown preset '{name}', expected 'zero' or 'dmg'\n{USAGE}");
        }
        _ => RegisterInit::dmg(),
    };

    let slots: [(&str, &mut u16); 6] = [
        ("AF", &mut init.af),
        ("BC", &mut init.bc),
        ("DE", &mut init.de),
        ("HL", &mut init.hl),
        ("SP", &mut init.sp),
        ("PC", &mut init.pc),
    ];
    for (name, slot) in slots {
        match args.next() {
            Some(text) => *slot = parse_word(name, &text)?,
            None => break,
        }
    }
    if let Some(extra) = args.next() {
        bail!("unexpected argument '{extra}'\n{USAGE}");
    }
    Ok(init)
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(args.first().map(String::as_str), Some("-h" | "--help")) {
        println!("{USAGE}");
        return Ok(());
    }

    let init = parse_args(args)?;
    log::debug!("register init: {:?}", init);
    let regs = Registers::from_init(&init);

    println!("{regs}");
    for flag in Flag::ALL {
        println!("{:?} (bit {}) = {}", flag, flag.bit(), u8::from(regs.flag(flag)));
    }
    Ok(())
}
