#![no_main]
use libfuzzer_sys::fuzz_target;
use tinyprintf_core::{Argument, DataModel, FormatConfig, Formatter};

fuzz_target!(|data: &[u8]| {
    // Layout: [capacity, model, ...format]. Arguments are fixed so every
    // conversion kind gets something of its own type as well as a mismatch.
    if data.len() < 2 {
        return;
    }
    let capacity = usize::from(data[0]);
    let model = if data[1] & 1 == 0 {
        DataModel::NATIVE
    } else {
        DataModel::MOS
    };
    let fmt = &data[2..];
    let formatter = Formatter::with_config(FormatConfig::DEFAULT.with_data_model(model));
    let list = [
        Argument::Signed(-1234),
        Argument::Unsigned(u64::MAX),
        Argument::Float(-0.000_123_4),
        Argument::Str(b"fuzz\0tail"),
        Argument::Char(b'z'),
        Argument::Pointer(0xBEEF),
        Argument::Float(f64::NAN),
        Argument::Signed(i64::from(data[0]) - 128),
        Argument::Float(1.0e300),
    ];

    let expected = formatter.format_len(fmt, &list);

    let mut buf = vec![0xA5u8; capacity];
    let len = formatter.snprintf(&mut buf, fmt, &list);
    assert_eq!(len, expected, "bounded and discard lengths differ");
    if capacity > 0 {
        let kept = len.min(capacity - 1);
        assert_eq!(buf[kept], 0, "terminator not after content");
        assert!(buf[kept + 1..].iter().all(|&b| b == 0xA5), "write past terminator");
    }

    let mut streamed = 0usize;
    let len = formatter.fctprintf(|_c: u8| streamed += 1, fmt, &list);
    assert_eq!(len, expected, "callback and discard lengths differ");
    assert!(streamed <= len);
});
