use crate::models::{Category, ProjectAggregate};

/// Install-manifest artifact: one installable package name per line, sorted,
/// no version pinning. `None` when the scan found no third-party tokens.
pub fn install_manifest(aggregate: &ProjectAggregate) -> Option<String> {
    let third_party = aggregate.tokens_in(Category::ThirdParty);
    if third_party.is_empty() {
        return None;
    }

    let mut manifest = String::new();
    for entry in third_party {
        manifest.push_str(&entry.name);
        manifest.push('\n');
    }
    Some(manifest)
}

/// Build-skeleton artifact: a fixed Makefile template parameterized only by
/// the discovered compiled sources. `None` when no header-dialect file was
/// scanned.
pub fn build_skeleton(aggregate: &ProjectAggregate) -> Option<String> {
    if aggregate.compiled_sources.is_empty() {
        return None;
    }

    let sources: Vec<String> = aggregate
        .compiled_sources
        .iter()
        .map(|path| path.display().to_string())
        .collect();

    Some(format!(
        "CXX = g++\n\
         CXXFLAGS = -std=c++17 -Wall -O2\n\
         \n\
         TARGET = main\n\
         SRCS = {}\n\
         OBJS = $(SRCS:.cpp=.o)\n\
         \n\
         all: $(TARGET)\n\
         \n\
         $(TARGET): $(OBJS)\n\
         \t$(CXX) $(CXXFLAGS) -o $(TARGET) $(OBJS)\n\
         \n\
         clean:\n\
         \trm -f $(TARGET) $(OBJS)\n",
        sources.join(" ")
    ))
}
