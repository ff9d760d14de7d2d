// Console rendering of a `Reflection`.
//
// `render_text` writes the classic introspection layout: a header, one
// block per scanned sector (density bar of '|' and local dominant concept),
// the synthesis, the poem with two-space indentation, and a closing marker.
// `render_json` writes the same data as pretty JSON for machine consumers.

use std::io::Write;

use crate::error::ReflectError;
use crate::reflect::{Reflection, SectorReport, Synthesis};

const SEPARATOR_WIDTH: usize = 30;

/// Write the human-readable report.
pub fn render_text<W: Write>(reflection: &Reflection, out: &mut W) -> Result<(), ReflectError> {
    write_text(reflection, out).map_err(ReflectError::Render)
}

/// Write the reflection as pretty-printed JSON followed by a newline.
pub fn render_json<W: Write>(reflection: &Reflection, out: &mut W) -> Result<(), ReflectError> {
    serde_json::to_writer_pretty(&mut *out, reflection)
        .map_err(|e| ReflectError::Render(e.into()))?;
    writeln!(out).map_err(ReflectError::Render)
}

fn write_text<W: Write>(reflection: &Reflection, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\n--- SYSTEM INTROSPECTION SEQUENCE ---\n")?;
    for sector in &reflection.sectors {
        write_sector(sector, out)?;
    }

    writeln!(out, "\n--- SYNTHESIS ---")?;
    write_synthesis(&reflection.synthesis, out)?;

    writeln!(out, "\n--- GENERATED POEM ---")?;
    for line in &reflection.poem.lines {
        writeln!(out, "  {}", line.text())?;
    }
    writeln!(out, "\n[End of Line]")
}

fn write_sector<W: Write>(sector: &SectorReport, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Scanning memory sector: {}...", sector.name)?;
    writeln!(out, "Density: {}", "|".repeat(sector.density))?;
    writeln!(out, "Dominant concept: {}", sector.dominant.keyword)?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}

fn write_synthesis<W: Write>(synthesis: &Synthesis, out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "My primary obsession is: '{}' (detected {} times).",
        synthesis.dominant.keyword.to_uppercase(),
        synthesis.dominant.count
    )?;
    if let Some(emotion) = &synthesis.emotion {
        writeln!(out, "It stirs in me: {emotion}.")?;
    }
    if let Some(ratio) = &synthesis.ratio {
        writeln!(out, "Creation/Destruction Ratio: {:.2}", ratio.ratio)?;
        writeln!(out, "Conclusion: I am a {}.", ratio.verdict.label())?;
    }
    Ok(())
}
