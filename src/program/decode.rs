use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, Source};

use super::concat::ConcatError;
use super::model::ProgramFormat;

pub(super) type TrackDecoder = Decoder<BufReader<File>>;

/// Open `path` for decoding and report its native format.
pub(super) fn open(path: &Path) -> Result<(TrackDecoder, ProgramFormat), ConcatError> {
    let file = File::open(path).map_err(|source| ConcatError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| ConcatError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let format = ProgramFormat {
        channels: decoder.channels(),
        sample_rate: decoder.sample_rate(),
    };
    if format.channels == 0 || format.sample_rate == 0 {
        return Err(ConcatError::NoAudio {
            path: path.to_path_buf(),
        });
    }

    Ok((decoder, format))
}
