/*!
# Sharded pair writing

Accepted pairs are buffered by a [ShardWriter] and written in shards of a fixed number of pairs.

Each shard is a couple of plain text files, one per language, holding one sentence per line:

```text
<dst>/<dataset version>/<dataset>/en-<lang>/0.en
<dst>/<dataset version>/<dataset>/en-<lang>/0.<lang>
<dst>/<dataset version>/<dataset>/en-<lang>/1.en
...
```

Line `n` of `k.en` and line `n` of `k.<lang>` always come from the same pair,
and every shard but the last one holds exactly `capacity` pairs.
!*/
mod shardwriter;

use std::path::{Path, PathBuf};

use crate::{lang::Language, sources::DatasetTag};

pub use shardwriter::{ShardStats, ShardWriter, DEFAULT_SHARD_CAPACITY};

/// Directory holding the shards of a (version, dataset, language pair) stream.
pub fn shard_dir(dst: &Path, version: &str, dataset: DatasetTag, target: Language) -> PathBuf {
    [
        dst,
        Path::new(version),
        Path::new(dataset.name()),
        Path::new(&target.pair_name()),
    ]
    .iter()
    .collect()
}

/// Path of the `lang` side of shard `idx`.
pub fn shard_path(dir: &Path, idx: usize, lang: Language) -> PathBuf {
    let mut path = dir.to_path_buf();
    path.push(format!("{}.{}", idx, lang.code()));
    path
}
