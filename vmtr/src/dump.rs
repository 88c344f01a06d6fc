use color_print::cformat;

use crate::unit::{Translation, Unit};

/// Print the VM source next to the assembly it produced, with ROM addresses
/// counted from the start of the unit.
pub fn print_dump(unit: &Unit, out: &Translation) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(19),
        unit.path(),
        "-".repeat(45usize.saturating_sub(unit.path().len()))
    );

    let mut blocks = out.blocks.iter().peekable();
    let mut pc: usize = 0;
    for line in unit.lines() {
        let comment = line
            .comment()
            .map(|s| cformat!("<dim>// {}</>", s))
            .unwrap_or_default();

        match blocks.next_if(|block| block.idx == line.idx()) {
            Some(block) => {
                println!(
                    "{:19}| {:>4}: {} {}",
                    "",
                    line.no(),
                    block.cmd.cformat(),
                    comment
                );
                for asm in &block.code {
                    if asm.is_inst() {
                        println!("[{:04X}] {:12}|       {}", pc, "", asm.cformat());
                        pc += 1;
                    } else {
                        println!("{:19}|       {}", "", asm.cformat());
                    }
                }
            }
            None if line.code().is_empty() => {
                println!("{:19}| {:>4}: {}", "", line.no(), comment);
            }
            None => {
                let text = cformat!("<r,s>{}</>", line.code());
                println!("{:19}| {:>4}: {} {}", "", line.no(), text, comment);
            }
        }
    }
    println!("-------------------+-----------------------------------------------------");
}
