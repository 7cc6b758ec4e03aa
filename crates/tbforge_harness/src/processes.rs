//! The fixed concurrent statements of every harness, in emission order:
//! clock, valid/frame-end generator, data pointer, and the reset/end-of-run
//! sequence.

use crate::signals::{
    BenchSignals, CLOCK, END_OF_SIM, FRAME_COUNTER, LAST, POINTER, PRESCALER_COUNTER, RESET,
    VALID,
};
use crate::error::HarnessError;
use crate::writer::VhdlWriter;
use tbforge_common::{delay_literal, Frequency, TimeUnit};
use tbforge_config::ConfigError;

/// Writes all fixed processes.
pub fn write_processes(
    w: &mut VhdlWriter,
    signals: &BenchSignals,
    frequency: Frequency,
    unit: TimeUnit,
) -> Result<(), HarnessError> {
    write_clock(w, frequency, unit)?;
    w.blank();
    write_valid_generator(w, signals.frame_marking());
    w.blank();
    write_data_pointer(w);
    w.blank();
    write_stimulus(w);
    Ok(())
}

/// `clk <= not(clk) after <half period>;`
///
/// The half period is rounded to the femtosecond and written exactly in
/// `unit`, so it is never zero.
pub fn write_clock(
    w: &mut VhdlWriter,
    frequency: Frequency,
    unit: TimeUnit,
) -> Result<(), HarnessError> {
    let half_period = frequency.half_period_fs().ok_or_else(|| {
        HarnessError::Config(ConfigError::ValidationError(format!(
            "clock frequency {frequency} has no representable half period"
        )))
    })?;
    w.line(format!(
        "{CLOCK} <= not({CLOCK}) after {}; -- {frequency}",
        delay_literal(half_period, unit)
    ));
    Ok(())
}

/// The `fi_sim` process.
///
/// `s_axis_tvalid` is high for one cycle every `PRESCALER` cycles. With frame
/// marking, `s_axis_tlast` is high on every `FRAME_SIZE`-th valid cycle.
pub fn write_valid_generator(w: &mut VhdlWriter, frame_marking: bool) {
    w.line("-- one valid cycle every PRESCALER cycles");
    if frame_marking {
        w.line("-- and one frame end every FRAME_SIZE valid cycles");
    }
    w.line(format!("fi_sim : process({CLOCK})"));
    w.line("begin");
    w.indent();
    w.line(format!("if rising_edge({CLOCK}) then"));
    w.indent();
    w.line(format!("if ({RESET} = '0') then"));
    w.indent();
    w.line(format!("{VALID} <= '0';"));
    w.line(format!("{PRESCALER_COUNTER} <= 0;"));
    if frame_marking {
        w.line(format!("{FRAME_COUNTER} <= 0;"));
        w.line(format!("{LAST} <= '0';"));
    }
    w.dedent();
    w.line("else");
    w.indent();
    w.line(format!("{VALID} <= '0';"));
    if frame_marking {
        w.line(format!("{LAST} <= '0';"));
    }
    w.line(format!("if ({PRESCALER_COUNTER} < PRESCALER-1) then"));
    w.indent();
    w.line(format!("{PRESCALER_COUNTER} <= {PRESCALER_COUNTER}+1;"));
    w.dedent();
    w.line("else");
    w.indent();
    w.line(format!("{PRESCALER_COUNTER} <= 0;"));
    w.line(format!("{VALID} <= '1';"));
    if frame_marking {
        w.line(format!("if ({FRAME_COUNTER} < FRAME_SIZE-1) then"));
        w.indent();
        w.line(format!("{FRAME_COUNTER} <= {FRAME_COUNTER}+1;"));
        w.dedent();
        w.line("else");
        w.indent();
        w.line(format!("{FRAME_COUNTER} <= 0;"));
        w.line(format!("{LAST} <= '1';"));
        w.dedent();
        w.line("end if;");
    }
    w.dedent();
    w.line("end if;");
    w.dedent();
    w.line("end if;");
    w.dedent();
    w.line("end if;");
    w.dedent();
    w.line("end process fi_sim;");
}

/// The `data_sim` process: advances `pointer` modulo `LUT_DEPTH` on valid cycles.
pub fn write_data_pointer(w: &mut VhdlWriter) {
    w.line(format!("data_sim : process({CLOCK})"));
    w.line("begin");
    w.indent();
    w.line(format!("if rising_edge({CLOCK}) then"));
    w.indent();
    w.line(format!("if ({RESET} = '0') then"));
    w.indent();
    w.line(format!("{POINTER} <= 0;"));
    w.dedent();
    w.line(format!("elsif ({VALID} = '1') then"));
    w.indent();
    w.line(format!("if ({POINTER} < LUT_DEPTH-1) then"));
    w.indent();
    w.line(format!("{POINTER} <= {POINTER}+1;"));
    w.dedent();
    w.line("else");
    w.indent();
    w.line(format!("{POINTER} <= 0;"));
    w.dedent();
    w.line("end if;");
    w.dedent();
    w.line("end if;");
    w.dedent();
    w.line("end if;");
    w.dedent();
    w.line("end process data_sim;");
}

/// The `xsim` process: two reset edges, two idle edges, then wait for `eos`.
pub fn write_stimulus(w: &mut VhdlWriter) {
    let edge = format!("wait until rising_edge({CLOCK});");
    w.line("xsim : process");
    w.line("begin");
    w.indent();
    w.line(format!("{RESET} <= '0';"));
    w.line(&edge);
    w.line(&edge);
    w.line(format!("{RESET} <= '1';"));
    w.line(&edge);
    w.line(&edge);
    w.line(format!("wait until rising_edge({END_OF_SIM});"));
    w.line("report \"End of simulation\" severity failure;");
    w.dedent();
    w.line("end process xsim;");
}
