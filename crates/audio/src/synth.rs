//! Procedural cue sounds. No asset files are shipped; every cue is generated.

use std::f32::consts::TAU;

pub const SAMPLE_RATE: u32 = 44_100;

/// Eighth-note length of the background tune, in seconds.
const EIGHTH_SECS: f32 = 0.15;

const E5: f32 = 659.25;
const D5: f32 = 587.33;
const C5: f32 = 523.25;
const B4: f32 = 493.88;
const A4: f32 = 440.0;
const REST: f32 = 0.0;

/// (frequency, length in eighths). A rest has frequency 0.
const MELODY: [(f32, u32); 20] = [
    (E5, 2),
    (B4, 1),
    (C5, 1),
    (D5, 2),
    (C5, 1),
    (B4, 1),
    (A4, 2),
    (A4, 1),
    (C5, 1),
    (E5, 2),
    (D5, 1),
    (C5, 1),
    (B4, 3),
    (C5, 1),
    (D5, 2),
    (E5, 2),
    (C5, 2),
    (A4, 2),
    (A4, 2),
    (REST, 2),
];

/// Attack/release ramp applied to every note, avoids clicks at boundaries.
fn envelope(pos: u32, len: u32, sample_rate: u32) -> f32 {
    let attack = (sample_rate / 100).max(1);
    let release = (sample_rate / 40).max(1);
    if pos < attack {
        pos as f32 / attack as f32
    } else if pos + release >= len {
        len.saturating_sub(pos) as f32 / release as f32
    } else {
        1.0
    }
}

fn voice(freq: f32, t: f32) -> f32 {
    let phase = TAU * freq * t;
    phase.sin() + (phase * 3.0).sin() * 0.2
}

/// Endless mono background tune.
#[derive(Debug, Clone)]
pub struct BackgroundLoop {
    sample_rate: u32,
    note: usize,
    pos: u32,
}

impl BackgroundLoop {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            note: 0,
            pos: 0,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn note_len(&self, eighths: u32) -> u32 {
        ((self.sample_rate as f32 * EIGHTH_SECS) as u32).max(1) * eighths
    }

    /// Samples in one pass of the tune.
    pub fn period(&self) -> u64 {
        MELODY
            .iter()
            .map(|&(_, eighths)| self.note_len(eighths) as u64)
            .sum()
    }
}

impl Default for BackgroundLoop {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}

impl Iterator for BackgroundLoop {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let (freq, eighths) = MELODY[self.note];
        let len = self.note_len(eighths);

        let sample = if freq == REST {
            0.0
        } else {
            let t = self.pos as f32 / self.sample_rate as f32;
            voice(freq, t) * 0.25 * envelope(self.pos, len, self.sample_rate)
        };

        self.pos += 1;
        if self.pos >= len {
            self.pos = 0;
            self.note = (self.note + 1) % MELODY.len();
        }
        Some(sample)
    }
}

/// Two short descending notes.
pub fn pause_chime(sample_rate: u32) -> Vec<f32> {
    let note_len = (sample_rate as f32 * 0.12) as u32;
    [880.0, E5]
        .iter()
        .flat_map(|&freq| {
            (0..note_len).map(move |i| {
                let t = i as f32 / sample_rate as f32;
                let decay = (-t * 14.0).exp();
                voice(freq, t) * 0.5 * decay * envelope(i, note_len, sample_rate)
            })
        })
        .collect()
}

/// A falling exponential sweep from A4 down two octaves.
pub fn loss_alarm(sample_rate: u32) -> Vec<f32> {
    const DURATION_SECS: f32 = 1.2;
    const FROM_HZ: f32 = A4;
    const TO_HZ: f32 = A4 / 4.0;

    let len = (sample_rate as f32 * DURATION_SECS) as u32;
    let mut phase = 0.0f32;
    (0..len)
        .map(|i| {
            let progress = i as f32 / len as f32;
            let freq = FROM_HZ * (TO_HZ / FROM_HZ).powf(progress);
            phase = (phase + TAU * freq / sample_rate as f32) % TAU;
            let square_ish = (phase.sin() * 3.0).tanh();
            square_ish * 0.35 * (1.0 - progress) * envelope(i, len, sample_rate)
        })
        .collect()
}

#[cfg(feature = "playback")]
impl rodio::Source for BackgroundLoop {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(samples: &[f32]) -> bool {
        samples.iter().all(|s| s.is_finite() && (-1.0..=1.0).contains(s))
    }

    #[test]
    fn background_loop_never_ends_and_repeats() {
        let bg = BackgroundLoop::new(8_000);
        let period = bg.period() as usize;
        let samples: Vec<f32> = bg.take(period * 2 + 10).collect();
        assert_eq!(samples.len(), period * 2 + 10);
        assert!(in_range(&samples));
        assert_eq!(samples[..10], samples[period..period + 10]);
    }

    #[test]
    fn background_loop_is_not_silent() {
        let peak = BackgroundLoop::new(8_000)
            .take(8_000)
            .fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.1);
    }

    #[test]
    fn one_shot_cues_are_short_and_bounded() {
        let chime = pause_chime(SAMPLE_RATE);
        assert_eq!(chime.len(), 2 * (SAMPLE_RATE as f32 * 0.12) as usize);
        assert!(in_range(&chime));

        let alarm = loss_alarm(SAMPLE_RATE);
        assert_eq!(alarm.len(), (SAMPLE_RATE as f32 * 1.2) as usize);
        assert!(in_range(&alarm));
    }

    #[test]
    fn cues_start_and_end_quietly() {
        for samples in [pause_chime(SAMPLE_RATE), loss_alarm(SAMPLE_RATE)] {
            assert!(samples[0].abs() < 1e-3);
            assert!(samples[samples.len() - 1].abs() < 0.05);
        }
    }
}
