use std::{cell::RefCell, sync::Arc};

use super::*;

fn frame_2x1() -> FrameRgba8 {
    FrameRgba8 {
        width: 2,
        height: 1,
        rgba8: vec![255, 0, 0, 255, 0, 0, 255, 255],
    }
}

#[test]
fn snapshot_png_round_trips_pixels() {
    let frame = frame_2x1();
    let png = encode_snapshot_png(&frame).unwrap();

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!((decoded.width(), decoded.height()), (2, 1));
    assert_eq!(decoded.into_raw(), frame.rgba8);
}

#[test]
fn mismatched_buffer_length_is_a_snapshot_error() {
    let frame = FrameRgba8 {
        width: 2,
        height: 2,
        rgba8: vec![0; 4],
    };
    let err = encode_snapshot_png(&frame).unwrap_err();
    assert!(matches!(err, TeeformError::Snapshot(_)));
}

struct RecordingSink {
    available: bool,
    fail: bool,
    shared: RefCell<Vec<(String, Arc<Vec<u8>>)>>,
}

impl RecordingSink {
    fn new(available: bool, fail: bool) -> Self {
        Self {
            available,
            fail,
            shared: RefCell::new(Vec::new()),
        }
    }
}

impl ShareSink for RecordingSink {
    fn is_available(&self) -> bool {
        self.available
    }

    fn share(&self, payload: &SharePayload<'_>) -> TeeformResult<()> {
        if self.fail {
            return Err(TeeformError::snapshot("platform refused"));
        }
        self.shared
            .borrow_mut()
            .push((payload.file_name.to_string(), Arc::new(payload.png.to_vec())));
        Ok(())
    }
}

#[test]
fn share_delivers_when_capability_exists() {
    let sink = RecordingSink::new(true, false);
    let delivered = share_snapshot(&sink, &frame_2x1(), "My Design", "look!").unwrap();
    assert!(delivered);

    let shared = sink.shared.borrow();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].0, SNAPSHOT_FILE_NAME);
    image::load_from_memory(&shared[0].1).unwrap();
}

#[test]
fn missing_capability_is_a_silent_skip() {
    let sink = RecordingSink::new(false, false);
    let delivered = share_snapshot(&sink, &frame_2x1(), "t", "t").unwrap();
    assert!(!delivered);
    assert!(sink.shared.borrow().is_empty());
}

#[test]
fn sink_failure_surfaces_as_snapshot_error() {
    let sink = RecordingSink::new(true, true);
    let err = share_snapshot(&sink, &frame_2x1(), "t", "t").unwrap_err();
    assert!(matches!(err, TeeformError::Snapshot(_)));
}
