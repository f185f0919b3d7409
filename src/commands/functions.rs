use crate::core::symbols::{self, SymbolKind};

/// One line per symbol: name, then its kind and arity.
pub fn render() -> String {
    let mut out = String::new();
    for info in symbols::collect_symbols() {
        let kind = match (info.kind, info.arity) {
            (SymbolKind::Function, Some(n)) => format!("function/{}", n),
            (SymbolKind::Function, None) => "function".to_string(),
            (SymbolKind::Constant, _) => "constant".to_string(),
        };
        out.push_str(&format!("{:<8}{}\n", info.name, kind));
    }
    out
}

pub fn main() -> anyhow::Result<()> {
    print!("{}", render());
    Ok(())
}
