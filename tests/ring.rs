use std::{
    thread,
    time::Duration,
    };
use embedded_io::{Read, ReadReady};

use rxline::{
    engine::SoftFifo,
    error::ReadError,
    ring::RxRing,
    };


fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}


#[test]
fn wraparound_order() {
    // park both cursors just before the physical end of the storage
    let fifo = SoftFifo::<8>::new();
    let mut ring = RxRing::new(&fifo);
    fifo.extend(&[0; 7]);
    let mut scratch = [0; 7];
    ring.consume(&mut scratch);
    assert_eq!(ring.bytes_available(), 0);

    // this run crosses the wrap point
    fifo.extend(b"hello");
    assert_eq!(ring.bytes_available(), 5);
    let mut out = [0; 5];
    ring.consume(&mut out);
    assert_eq!(&out, b"hello");
    assert_eq!(ring.bytes_available(), 0);
}

#[test]
fn available_count_stays_in_bounds() {
    let fifo = SoftFifo::<8>::new();
    let mut ring = RxRing::new(&fifo);
    // walk the cursors through several laps in every relative position
    for step in 0 .. 64u8 {
        fifo.push(step);
        assert!(ring.bytes_available() < 8);
        if ring.bytes_available() > 4 {
            let mut byte = [0];
            ring.consume(&mut byte);
        }
        assert!(ring.bytes_available() < 8);
    }
}

#[test]
fn empty_scan_finds_nothing() {
    let fifo = SoftFifo::<8>::new();
    let ring = RxRing::new(&fifo);
    assert!(! ring.is_readable());
    assert_eq!(ring.can_read_line(), 0);
    assert_eq!(ring.can_read_line(), 0);
}

#[test]
fn delimiter_boundary() {
    let fifo = SoftFifo::<16>::new();
    let mut ring = RxRing::new(&fifo);
    fifo.extend(b"AB\nCD");

    // length includes the delimiter
    assert_eq!(ring.can_read_line(), 3);
    let mut line = [0; 3];
    ring.consume(&mut line);
    assert_eq!(&line, b"AB\n");

    // the remainder holds no complete line yet
    assert_eq!(ring.can_read_line(), 0);
    assert_eq!(ring.bytes_available(), 2);
}

#[test]
fn line_across_wrap() {
    let fifo = SoftFifo::<8>::new();
    let mut ring = RxRing::new(&fifo);
    fifo.extend(&[0; 6]);
    let mut sink = [0; 6];
    ring.consume(&mut sink);

    // delimiter lands past the wrap point
    fifo.extend(b"ok\n!");
    assert_eq!(ring.can_read_line(), 3);
    let mut line = [0; 3];
    ring.consume(&mut line);
    assert_eq!(&line, b"ok\n");
    assert_eq!(ring.bytes_available(), 1);
}

#[test]
fn custom_delimiter() {
    let fifo = SoftFifo::<16>::new();
    let mut ring = RxRing::new(&fifo);
    ring.set_delimiter(b';');
    fifo.extend(b"a\nb;c");
    assert_eq!(ring.can_read_line(), 4);
}

#[test]
fn line_too_long_for_destination() {
    let fifo = SoftFifo::<16>::new();
    let mut ring = RxRing::new(&fifo);
    fifo.extend(b"1234\n");

    // no room for the terminator either
    let mut small = [0; 4];
    assert_eq!(ring.read_line(&mut small), Err(ReadError::BufferTooSmall));
    let mut exact = [0; 5];
    assert_eq!(ring.read_line(&mut exact), Err(ReadError::BufferTooSmall));

    // nothing was consumed, a larger destination receives the same line
    assert_eq!(ring.bytes_available(), 5);
    let mut larger = [0; 6];
    assert_eq!(ring.read_line(&mut larger), Ok(5));
    assert_eq!(&larger, b"1234\n\0");
    assert_eq!(ring.bytes_available(), 0);
}

#[test]
fn clear_catches_up_with_the_engine() {
    let fifo = SoftFifo::<8>::new();
    let mut ring = RxRing::new(&fifo);
    fifo.extend(b"stale");
    ring.clear();
    assert_eq!(ring.bytes_available(), 0);

    // bytes arriving after the clear are seen again
    fifo.push(b'x');
    assert_eq!(ring.bytes_available(), 1);
    let mut byte = [0];
    ring.consume(&mut byte);
    assert_eq!(byte[0], b'x');
}

#[test]
fn no_loss_under_incremental_delivery() {
    init_logs();
    // the producer trickles bytes one at a time while the consumer blocks,
    // 200 pending at worst which the capacity absorbs without overwriting
    static FIFO: SoftFifo<256> = SoftFifo::new();
    let producer = thread::spawn(|| {
        for byte in 0 .. 200u8 {
            FIFO.push(byte);
            thread::sleep(Duration::from_micros(20));
        }
    });

    let mut ring = RxRing::new(&FIFO);
    let mut out = [0u8; 200];
    ring.read_exact(&mut out);
    producer.join().unwrap();

    let expected: Vec<u8> = (0 .. 200).collect();
    assert_eq!(&out[..], &expected[..]);
}

#[test]
fn read_line_blocks_until_delimiter_arrives() {
    init_logs();
    static FIFO: SoftFifo<64> = SoftFifo::new();
    let producer = thread::spawn(|| {
        FIFO.extend(b"status ");
        thread::sleep(Duration::from_millis(5));
        FIFO.extend(b"ok\n");
    });

    let mut ring = RxRing::new(&FIFO);
    let mut line = [0u8; 16];
    let length = ring.read_line(&mut line).unwrap();
    producer.join().unwrap();

    assert_eq!(length, 10);
    assert_eq!(&line[.. 10], b"status ok\n");
    assert_eq!(line[10], 0);
}

#[test]
fn embedded_io_surface() {
    let fifo = SoftFifo::<16>::new();
    let mut ring = RxRing::new(&fifo);
    assert!(! ring.read_ready().unwrap());

    fifo.extend(b"abc");
    assert!(ring.read_ready().unwrap());
    let mut buf = [0; 8];
    let received = ring.read(&mut buf).unwrap();
    assert_eq!(received, 3);
    assert_eq!(&buf[.. 3], b"abc");
    assert!(! ring.read_ready().unwrap());
}
