//! SVG-Pfaddaten (`d`-Attribut) <-> Vector Network.
//!
//! Unterstützt `M L H V C S Z` (absolut und relativ). Quadratische Kurven
//! und Bögen (`Q T A`) werden mit einem Fehler abgelehnt.

use crate::core::{Segment, VectorNetwork};
use anyhow::{anyhow, bail, Context, Result};
use glam::DVec2;
use regex::Regex;
use std::sync::LazyLock;

static TOKEN: LazyLock<std::result::Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?")
});

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

// ── Encode ──────────────────────────────────────────────────────────

/// Schreibt ein Netz als Pfaddaten mit absoluten Koordinaten.
///
/// Segmente werden zu Ketten verbunden, solange ein Segment am Ende des
/// vorherigen beginnt; eine Kette, die an ihrem Start endet, wird mit `Z`
/// geschlossen. Vertices ohne Segment werden als einzelnes `M` geschrieben.
pub fn encode(network: &VectorNetwork, offset: DVec2) -> String {
    let point = |index: usize| network.vertices[index] + offset;
    let mut parts: Vec<String> = Vec::new();
    let mut current: Option<usize> = None;
    let mut start: Option<usize> = None;

    for seg in &network.segments {
        if current != Some(seg.a) {
            parts.push(format!("M{}", format_point(point(seg.a))));
            start = Some(seg.a);
        }
        if seg.is_straight() {
            parts.push(format!("L{}", format_point(point(seg.b))));
        } else {
            parts.push(format!(
                "C{} {} {}",
                format_point(point(seg.a) + seg.ta),
                format_point(point(seg.b) + seg.tb),
                format_point(point(seg.b))
            ));
        }
        current = Some(seg.b);
        if start == Some(seg.b) && seg.a != seg.b {
            parts.push("Z".to_string());
        }
    }

    for index in 0..network.vertices.len() {
        if !network.segments.iter().any(|s| s.touches(index)) {
            parts.push(format!("M{}", format_point(point(index))));
        }
    }
    parts.join(" ")
}

fn format_point(p: DVec2) -> String {
    format!("{} {}", format_number(p.x), format_number(p.y))
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

// ── Decode ──────────────────────────────────────────────────────────

fn tokenize(d: &str) -> Result<Vec<Token>> {
    let regex = TOKEN
        .as_ref()
        .map_err(|e| anyhow!("Pfaddaten-Tokenizer ungültig: {}", e))?;
    let mut tokens = Vec::new();
    let mut last_end = 0;
    for m in regex.find_iter(d) {
        check_separator(&d[last_end..m.start()], last_end)?;
        last_end = m.end();
        let text = m.as_str();
        match text.chars().next() {
            Some(c) if c.is_ascii_alphabetic() && text.len() == 1 => tokens.push(Token::Command(c)),
            _ => tokens.push(Token::Number(
                text.parse()
                    .with_context(|| format!("Ungültige Zahl in Pfaddaten: '{}'", text))?,
            )),
        }
    }
    check_separator(&d[last_end..], last_end)?;
    Ok(tokens)
}

fn check_separator(gap: &str, at: usize) -> Result<()> {
    if let Some(c) = gap.chars().find(|c| !c.is_whitespace() && *c != ',') {
        bail!("Ungültiges Zeichen '{}' in Pfaddaten (Position {})", c, at);
    }
    Ok(())
}

/// Baut das Netz beim Lesen der Pfadbefehle auf.
#[derive(Default)]
struct PathBuilder {
    network: VectorNetwork,
    current: Option<usize>,
    start: Option<usize>,
    /// Zweiter Kontrollpunkt des letzten `C`/`S` (für `S`-Spiegelung)
    last_control: Option<DVec2>,
}

impl PathBuilder {
    fn position(&self) -> DVec2 {
        self.current
            .map(|i| self.network.vertices[i])
            .unwrap_or(DVec2::ZERO)
    }

    fn push_vertex(&mut self, p: DVec2) -> usize {
        self.network.vertices.push(p);
        self.network.vertices.len() - 1
    }

    fn move_to(&mut self, p: DVec2) {
        let index = self.push_vertex(p);
        self.current = Some(index);
        self.start = Some(index);
    }

    fn require_current(&self, command: char) -> Result<usize> {
        self.current
            .ok_or_else(|| anyhow!("Pfadbefehl '{}' ohne vorheriges M", command))
    }

    fn line_to(&mut self, command: char, p: DVec2) -> Result<()> {
        let from = self.require_current(command)?;
        let to = self.push_vertex(p);
        self.network.segments.push(Segment::straight(from, to));
        self.current = Some(to);
        Ok(())
    }

    fn curve_to(&mut self, command: char, c1: DVec2, c2: DVec2, p: DVec2) -> Result<()> {
        let from = self.require_current(command)?;
        let origin = self.network.vertices[from];
        let to = self.push_vertex(p);
        self.network
            .segments
            .push(Segment::new(from, to, c1 - origin, c2 - p));
        self.current = Some(to);
        self.last_control = Some(c2);
        Ok(())
    }

    /// Schließt den Unterpfad. Endet er bereits auf dem Startpunkt, wird der
    /// doppelte Endvertex mit dem Start verschmolzen.
    fn close(&mut self) -> Result<()> {
        let current = self.require_current('Z')?;
        let Some(start) = self.start else {
            return Ok(());
        };
        if current == start {
            return Ok(());
        }
        let is_last = current == self.network.vertices.len() - 1;
        let used_once = self
            .network
            .segments
            .iter()
            .filter(|s| s.touches(current))
            .count()
            == 1;
        if self.network.vertices[current] == self.network.vertices[start] && is_last && used_once {
            self.network.vertices.pop();
            for seg in &mut self.network.segments {
                if seg.b == current {
                    seg.b = start;
                }
            }
        } else {
            self.network.segments.push(Segment::straight(current, start));
        }
        self.current = Some(start);
        Ok(())
    }
}

/// Liest Pfaddaten in ein Vector Network (absolute Koordinaten).
pub fn decode(d: &str) -> Result<VectorNetwork> {
    let tokens = tokenize(d)?;
    let mut builder = PathBuilder::default();
    let mut i = 0;
    let mut command: Option<char> = None;

    while i < tokens.len() {
        let cmd = match tokens[i] {
            Token::Command(c) => {
                i += 1;
                c
            }
            Token::Number(_) => match command {
                // Implizite Wiederholung; nach M/m folgt L/l
                Some('M') => 'L',
                Some('m') => 'l',
                Some(c) if !matches!(c, 'Z' | 'z') => c,
                _ => bail!("Zahl ohne Pfadbefehl in Pfaddaten"),
            },
        };
        command = Some(cmd);

        let relative = cmd.is_ascii_lowercase();
        let base = if relative { builder.position() } else { DVec2::ZERO };
        let mut take = |n: usize| -> Result<Vec<f64>> { read_numbers(&tokens, &mut i, n, cmd) };

        match cmd.to_ascii_uppercase() {
            'M' => {
                let v = take(2)?;
                builder.move_to(base + DVec2::new(v[0], v[1]));
                builder.last_control = None;
            }
            'L' => {
                let v = take(2)?;
                builder.line_to(cmd, base + DVec2::new(v[0], v[1]))?;
                builder.last_control = None;
            }
            'H' => {
                let v = take(1)?;
                let p = builder.position();
                let x = if relative { p.x + v[0] } else { v[0] };
                builder.line_to(cmd, DVec2::new(x, p.y))?;
                builder.last_control = None;
            }
            'V' => {
                let v = take(1)?;
                let p = builder.position();
                let y = if relative { p.y + v[0] } else { v[0] };
                builder.line_to(cmd, DVec2::new(p.x, y))?;
                builder.last_control = None;
            }
            'C' => {
                let v = take(6)?;
                builder.curve_to(
                    cmd,
                    base + DVec2::new(v[0], v[1]),
                    base + DVec2::new(v[2], v[3]),
                    base + DVec2::new(v[4], v[5]),
                )?;
            }
            'S' => {
                let v = take(4)?;
                let p = builder.position();
                let c1 = builder.last_control.map_or(p, |c| 2.0 * p - c);
                builder.curve_to(
                    cmd,
                    c1,
                    base + DVec2::new(v[0], v[1]),
                    base + DVec2::new(v[2], v[3]),
                )?;
            }
            'Z' => {
                builder.close()?;
                builder.last_control = None;
            }
            'Q' | 'T' | 'A' => bail!("Nicht unterstützter Pfadbefehl: '{}'", cmd),
            _ => bail!("Unbekannter Pfadbefehl: '{}'", cmd),
        }
    }
    Ok(builder.network)
}

fn read_numbers(tokens: &[Token], i: &mut usize, n: usize, command: char) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        match tokens.get(*i) {
            Some(Token::Number(v)) => values.push(*v),
            _ => bail!("Zu wenige Zahlen für Pfadbefehl '{}'", command),
        }
        *i += 1;
    }
    Ok(values)
}
