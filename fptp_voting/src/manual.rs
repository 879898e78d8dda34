/*!

This is the long-form manual for `fptp_voting` and `fptpsim`.

## The model

Voters and parties both sit in a four-dimensional ideology space. The axes are, in order:
* economic
* diplomatic
* civil
* social

Every axis is conventionally between `0` and `1`. Values outside of this range are accepted.

The distance between two positions is the sum of the absolute differences along each axis
(the Manhattan or L1 distance). Two positions are at most `4` apart when they are normalized.

Each voter votes for the party closest to its own position. This preference is computed once,
when the voter is added to the election, and is not refreshed afterwards: adding or removing a
party does not change it. Call `Election::recompute_preferences` to match the voters against the
current parties again.

When several parties are at the same distance from a voter, the party that was added first wins.

## Counting

The election uses First-Past-The-Post: every voter gives one vote to its preferred party and the
party with the most votes wins. If several parties share the highest count, the party that was
added first wins.

Counting starts from zero every time, so counting twice gives the same result. A voter whose
preferred party has been removed is reported as unattributed.

## Populations

`fptpsim` builds a random population from plain text files, one name per line:

```text
Alice
Bob
Charlie
```

Blank lines are ignored. Three lists are used: first names, last names and party names. Party
names are taken in order, one per requested party. Ages are drawn between 18 and 100, and the
ideology components between 0 and 1 with two decimals.

```bash
fptpsim --voters 1000 --parties 5 --seed 42 --chart
```

prints the outcome:

```text
The winner is Green with 241 votes
Green       | ##################################################  241 (24.1%)
Labour      | ##############################################      224 (22.4%)
...
```

## Configuration

`fptpsim` comes with sensible defaults. It also accepts a configuration file in JSON:

```text
{
  "outputSettings": { "electionName": "Sample", "outputPath": "summary.json" },
  "dataSources": {
    "firstNamesPath": "first_names.txt",
    "lastNamesPath": "last_names.txt",
    "partyNamesPath": "party_names.txt"
  },
  "population": { "voters": 1000, "parties": 5, "randomSeed": "42" },
  "parties": [
    { "name": "Party 1", "ideology": [0.5, 0.5, 0.5, 0.5] }
  ]
}
```

All the sections are optional. The paths are relative to the directory of the configuration
file. If `parties` is present, these parties are used instead of random ones and the party names
file is not read. Options on the command line override the values of the file.

The summary written with `--out` can be compared later against a new run with `--reference`.

## Interactive mode

With `--interactive`, `fptpsim` reads commands from the terminal:
 - `help [command]`: lists the commands, or describes one
 - `logging [level]`: sets the logging level (`critical`, `error`, `warning`, `info`, `debug`, `notset`)
 - `exit`: leaves the program

 */
